//! List members: wrapped or flattened.

use awsgen_model::{ListShape, Member, ShapeGraph};

use super::dump_shape;
use crate::error::CompileError;
use crate::naming::resolve_tag;
use crate::plan::{InputRef, XmlOp};

/// Write every item of a list.
///
/// Wrapped lists get one container element named after the list member, with
/// each item named after the element member. Flattened lists repeat the item
/// element at the parent level, named after the list member itself.
pub(crate) fn dump_list(
    graph: &ShapeGraph,
    member: &Member,
    list: &ListShape,
    input: InputRef,
) -> Result<XmlOp, CompileError> {
    let element_shape = graph.shape(&list.member.shape)?;

    if list.flattened {
        let body = dump_shape(graph, member, element_shape, InputRef::Item)?;
        return Ok(XmlOp::ForEach {
            wrapper: None,
            input,
            body: vec![body],
        });
    }

    let body = dump_shape(graph, &list.member, element_shape, InputRef::Item)?;
    Ok(XmlOp::ForEach {
        wrapper: Some(resolve_tag(member).to_owned()),
        input,
        body: vec![body],
    })
}
