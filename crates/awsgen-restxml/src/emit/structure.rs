//! Structure shapes: the per-structure routine and nested structure members.

use awsgen_model::{Member, Shape, ShapeGraph, ShapeId, ShapeKind};
use tracing::debug;

use super::dump_shape;
use crate::error::CompileError;
use crate::naming::{namespace_attribute, resolve_tag};
use crate::plan::{InputRef, Routine, XmlOp};

/// Compile the routine writing the body members of `structure` into the
/// current node.
///
/// Members bound to another location are skipped. Required members, lists and
/// maps are written unconditionally from a direct field access; every other
/// member only when its field is present. The routine does not create an
/// element for the structure itself.
pub fn compile_members(graph: &ShapeGraph, structure: &ShapeId) -> Result<Routine, CompileError> {
    let shape = graph.shape(structure)?;
    let ShapeKind::Structure(definition) = &shape.kind else {
        return Err(CompileError::NotAStructure {
            shape: shape.name.clone(),
            kind: shape.kind.type_name(),
        });
    };

    let mut ops = Vec::with_capacity(definition.members.len());
    for member in &definition.members {
        if !member.location.is_body() {
            continue;
        }
        let op = compile_member(graph, member)
            .map_err(|e| e.in_member(&shape.name, member.label()))?;
        ops.push(op);
    }

    debug!(shape = %shape.name, ops = ops.len(), "compiled structure routine");
    Ok(Routine {
        shape: shape.name.clone(),
        ops,
    })
}

fn compile_member(graph: &ShapeGraph, member: &Member) -> Result<XmlOp, CompileError> {
    let target = graph.shape(&member.shape)?;
    let field = member.label().to_owned();
    let unconditional =
        member.required || matches!(target.kind, ShapeKind::List(_) | ShapeKind::Map(_));

    if unconditional {
        dump_shape(graph, member, target, InputRef::Field(field))
    } else {
        let body = dump_shape(graph, member, target, InputRef::Present)?;
        Ok(XmlOp::IfPresent {
            field,
            body: vec![body],
        })
    }
}

/// Append an element for a nested structure and fill it with the structure's
/// routine.
///
/// A namespace on the member wins over one on the shape.
pub(crate) fn dump_structure(member: &Member, shape: &Shape, input: InputRef) -> XmlOp {
    let namespace = member
        .xml_namespace
        .as_ref()
        .or(shape.xml_namespace.as_ref())
        .map(namespace_attribute);

    XmlOp::Structure {
        tag: resolve_tag(member).to_owned(),
        namespace,
        shape: shape.name.clone(),
        input,
    }
}
