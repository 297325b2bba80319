//! String and blob members.

use awsgen_model::Member;

use crate::naming::resolve_tag;
use crate::plan::{InputRef, XmlOp};

/// Write a text value as an attribute of the current node or as a child element.
///
/// Blob values are expected to be transport-encoded already; nothing is
/// encoded here.
pub(crate) fn dump_scalar(member: &Member, input: InputRef) -> XmlOp {
    let tag = resolve_tag(member).to_owned();
    if is_attribute(member) {
        XmlOp::Attribute { name: tag, input }
    } else {
        XmlOp::Element { tag, input }
    }
}

/// Whether `member` is written as an XML attribute.
///
/// Only structure members (those with a declared name) can be attributes; the
/// flag is ignored on list elements.
pub(crate) fn is_attribute(member: &Member) -> bool {
    member.xml_attribute && member.name.is_some()
}
