//! Emitters: compile shapes into [`XmlOp`]s.
//!
//! Every emitter is a pure function of the member being written, its shape and
//! where the input value comes from. The output node is implicit: ops always
//! write into whichever node the executor is filling when it reaches them.

mod boolean;
mod list;
mod scalar;
mod structure;

use awsgen_model::{Member, Shape, ShapeGraph, ShapeKind};

use crate::error::CompileError;
use crate::plan::{InputRef, XmlOp};

pub use structure::compile_members;

/// Compile the write of `member` (whose target is `shape`) reading `input`.
pub(crate) fn dump_shape(
    graph: &ShapeGraph,
    member: &Member,
    shape: &Shape,
    input: InputRef,
) -> Result<XmlOp, CompileError> {
    match &shape.kind {
        ShapeKind::Structure(_) => Ok(structure::dump_structure(member, shape, input)),
        ShapeKind::List(list) => list::dump_list(graph, member, list, input),
        ShapeKind::String | ShapeKind::Blob => Ok(scalar::dump_scalar(member, input)),
        ShapeKind::Boolean => boolean::dump_boolean(member, input),
        ShapeKind::Map(_) => Err(CompileError::UnsupportedMap {
            shape: shape.name.clone(),
        }),
        ShapeKind::Integer
        | ShapeKind::Long
        | ShapeKind::Float
        | ShapeKind::Double
        | ShapeKind::Timestamp => Err(CompileError::UnsupportedType {
            shape: shape.name.clone(),
            kind: shape.kind.type_name(),
        }),
    }
}
