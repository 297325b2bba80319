//! Wire naming rules shared by every emitter.

use awsgen_model::{Member, XmlNamespace};

use crate::plan::NamespaceAttr;

/// Tag used for members without a structural name (list elements).
pub const ANONYMOUS_TAG: &str = "member";

/// The element or attribute name a member is written under.
///
/// `locationName` wins; otherwise the declared name of a structure member;
/// otherwise [`ANONYMOUS_TAG`].
#[must_use]
pub fn resolve_tag(member: &Member) -> &str {
    member
        .location_name
        .as_deref()
        .or(member.name.as_deref())
        .unwrap_or(ANONYMOUS_TAG)
}

/// The attribute declaring `namespace`: `xmlns:prefix` or bare `xmlns`.
#[must_use]
pub fn namespace_attribute(namespace: &XmlNamespace) -> NamespaceAttr {
    let name = match namespace.prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => format!("xmlns:{prefix}"),
        _ => "xmlns".to_owned(),
    };
    NamespaceAttr {
        name,
        uri: namespace.uri.clone(),
    }
}
