//! Boolean members.

use awsgen_model::Member;

use super::scalar::is_attribute;
use crate::error::CompileError;
use crate::naming::resolve_tag;
use crate::plan::{InputRef, XmlOp};

/// Write a boolean as `<tag>true</tag>` / `<tag>false</tag>`.
///
/// Booleans have no attribute form. List elements never count as attributes.
pub(crate) fn dump_boolean(member: &Member, input: InputRef) -> Result<XmlOp, CompileError> {
    if is_attribute(member) {
        return Err(CompileError::BooleanAttribute {
            member: member.label().to_owned(),
        });
    }
    Ok(XmlOp::Boolean {
        tag: resolve_tag(member).to_owned(),
        input,
    })
}
