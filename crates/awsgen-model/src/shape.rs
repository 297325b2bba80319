//! Shape graph types: shapes, members, operations.
//!
//! The graph is produced once (by [`loader`](crate::loader) or by hand) and is
//! immutable afterwards. Shapes are owned by the [`ShapeGraph`] and members
//! refer to them by [`ShapeId`], so a single shape can be shared by any number
//! of members.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{ModelError, ModelResult};

/// Name of a shape inside a [`ShapeGraph`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Create a shape id from a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the shape name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for ShapeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Transport location a member is bound to.
///
/// Anything other than [`Location::Body`] is serialized by the request
/// builder (headers, URI labels, query string) and skipped by body serializers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// The member is part of the request body.
    #[default]
    #[serde(rename = "body")]
    Body,
    /// A single HTTP header.
    #[serde(rename = "header")]
    Header,
    /// A family of prefixed HTTP headers.
    #[serde(rename = "headers")]
    Headers,
    /// A URI path label.
    #[serde(rename = "uri")]
    Uri,
    /// A query string parameter.
    #[serde(rename = "querystring")]
    QueryString,
    /// The HTTP status code (responses only).
    #[serde(rename = "statusCode")]
    StatusCode,
}

impl Location {
    /// Returns `true` if the member is serialized into the body.
    #[must_use]
    pub fn is_body(self) -> bool {
        self == Self::Body
    }
}

/// An XML namespace declaration attached to a shape or member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNamespace {
    /// Namespace URI.
    pub uri: String,
    /// Optional prefix; `None` declares the default namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl XmlNamespace {
    /// Declare a default (unprefixed) namespace.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            prefix: None,
        }
    }

    /// Declare a prefixed namespace.
    #[must_use]
    pub fn prefixed(uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            prefix: Some(prefix.into()),
        }
    }
}

/// An edge from a container shape to a child shape, with its wire metadata.
///
/// Structure members carry a `name`; the element member of a list (and the
/// key/value members of a map) have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Declared field identifier.
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,

    /// Target shape.
    #[builder(setter(into))]
    pub shape: ShapeId,

    /// Wire name override.
    #[builder(default, setter(strip_option, into))]
    pub location_name: Option<String>,

    /// Transport location.
    #[builder(default)]
    pub location: Location,

    /// Whether the field must always be present.
    #[builder(setter(strip_bool))]
    pub required: bool,

    /// Serialize as an attribute of the parent element.
    #[builder(setter(strip_bool))]
    pub xml_attribute: bool,

    /// Namespace declared on this member.
    #[builder(default, setter(strip_option))]
    pub xml_namespace: Option<XmlNamespace>,

    /// Whether this member supplies the whole request body.
    #[builder(setter(strip_bool))]
    pub payload: bool,

    /// Whether the value is sent as a raw stream.
    #[builder(setter(strip_bool))]
    pub streaming: bool,
}

impl Member {
    /// Anonymous element member of a list targeting `shape`.
    #[must_use]
    pub fn element(shape: impl Into<ShapeId>) -> Self {
        Self::builder().shape(shape).build()
    }

    /// Name used when reporting errors about this member.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.location_name.as_deref())
            .unwrap_or("member")
    }
}

/// A structure shape: an ordered sequence of members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureShape {
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Name of the member supplying the whole body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl StructureShape {
    /// Look up a member by its declared name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }

    /// The payload member, if the structure declares one.
    #[must_use]
    pub fn payload_member(&self) -> Option<&Member> {
        self.payload.as_deref().and_then(|name| self.member(name))
    }
}

/// A list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListShape {
    /// Element member.
    pub member: Member,
    /// Serialize items as siblings without a wrapper element.
    pub flattened: bool,
}

/// A map shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapShape {
    /// Key member.
    pub key: Member,
    /// Value member.
    pub value: Member,
    /// Serialize entries without a wrapper element.
    pub flattened: bool,
}

/// The closed set of shape kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    /// A structure.
    Structure(StructureShape),
    /// A list.
    List(ListShape),
    /// A map.
    Map(MapShape),
    /// A string scalar.
    String,
    /// A binary scalar.
    Blob,
    /// A boolean scalar.
    Boolean,
    /// A 32-bit integer scalar.
    Integer,
    /// A 64-bit integer scalar.
    Long,
    /// A single-precision float scalar.
    Float,
    /// A double-precision float scalar.
    Double,
    /// A timestamp scalar.
    Timestamp,
}

impl ShapeKind {
    /// The model type name of this kind (e.g. `"structure"`).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Structure(_) => "structure",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::String => "string",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Timestamp => "timestamp",
        }
    }
}

/// A named shape definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Shape name.
    pub name: ShapeId,
    /// Kind and kind-specific data.
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Namespace declared on the shape itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_namespace: Option<XmlNamespace>,
    /// Whether values of this shape are streamed.
    pub streaming: bool,
}

impl Shape {
    /// Create a shape of the given kind.
    #[must_use]
    pub fn new(name: impl Into<ShapeId>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            xml_namespace: None,
            streaming: false,
        }
    }

    /// A structure shape with the given members.
    #[must_use]
    pub fn structure(name: impl Into<ShapeId>, members: Vec<Member>) -> Self {
        Self::new(
            name,
            ShapeKind::Structure(StructureShape {
                members,
                payload: None,
            }),
        )
    }

    /// A list shape with the given element member.
    #[must_use]
    pub fn list(name: impl Into<ShapeId>, member: Member, flattened: bool) -> Self {
        Self::new(name, ShapeKind::List(ListShape { member, flattened }))
    }

    /// A string shape.
    #[must_use]
    pub fn string(name: impl Into<ShapeId>) -> Self {
        Self::new(name, ShapeKind::String)
    }

    /// A blob shape.
    #[must_use]
    pub fn blob(name: impl Into<ShapeId>) -> Self {
        Self::new(name, ShapeKind::Blob)
    }

    /// A boolean shape.
    #[must_use]
    pub fn boolean(name: impl Into<ShapeId>) -> Self {
        Self::new(name, ShapeKind::Boolean)
    }

    /// Attach an XML namespace to the shape.
    #[must_use]
    pub fn with_xml_namespace(mut self, namespace: XmlNamespace) -> Self {
        self.xml_namespace = Some(namespace);
        self
    }

    /// Mark the shape as streaming.
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Declare `member` as the structure's payload.
    ///
    /// Has no effect on non-structure shapes.
    #[must_use]
    pub fn with_payload(mut self, member: &str) -> Self {
        if let ShapeKind::Structure(structure) = &mut self.kind {
            structure.payload = Some(member.to_owned());
            for m in &mut structure.members {
                m.payload = m.name.as_deref() == Some(member);
            }
        }
        self
    }

    /// The structure data, if this is a structure shape.
    #[must_use]
    pub fn as_structure(&self) -> Option<&StructureShape> {
        match &self.kind {
            ShapeKind::Structure(s) => Some(s),
            _ => None,
        }
    }
}

/// An operation: a name plus its (optional) input structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// Operation name.
    pub name: String,
    /// Root input structure shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<ShapeId>,
}

impl Operation {
    /// Create an operation.
    #[must_use]
    pub fn new(name: impl Into<String>, input: Option<ShapeId>) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Service-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    /// Wire protocol name (e.g. `rest-xml`).
    #[serde(default)]
    pub protocol: String,
    /// Service identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// API version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// The immutable graph of shapes and operations of one service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShapeGraph {
    metadata: ServiceMetadata,
    shapes: BTreeMap<ShapeId, Shape>,
    operations: BTreeMap<String, Operation>,
}

impl ShapeGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new(metadata: ServiceMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Add a shape, replacing any shape of the same name.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.insert_shape(shape);
        self
    }

    /// Add an operation, replacing any operation of the same name.
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.insert_operation(operation);
        self
    }

    /// Insert a shape.
    pub fn insert_shape(&mut self, shape: Shape) {
        self.shapes.insert(shape.name.clone(), shape);
    }

    /// Insert an operation.
    pub fn insert_operation(&mut self, operation: Operation) {
        self.operations.insert(operation.name.clone(), operation);
    }

    /// Service metadata.
    #[must_use]
    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    /// Look up a shape by id.
    pub fn shape(&self, id: &ShapeId) -> ModelResult<&Shape> {
        self.shapes
            .get(id)
            .ok_or_else(|| ModelError::UnknownShape(id.to_string()))
    }

    /// Look up an operation by name.
    pub fn operation(&self, name: &str) -> ModelResult<&Operation> {
        self.operations
            .get(name)
            .ok_or_else(|| ModelError::UnknownOperation(name.to_owned()))
    }

    /// All shapes, ordered by name.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// All operations, ordered by name.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Whether a member is streamed, either directly or through its target shape.
    pub fn is_streaming(&self, member: &Member) -> ModelResult<bool> {
        Ok(member.streaming || self.shape(&member.shape)?.streaming)
    }

    /// Check that every member and operation refers to a defined shape and
    /// that every declared payload names a member.
    pub fn validate(&self) -> ModelResult<()> {
        for shape in self.shapes.values() {
            match &shape.kind {
                ShapeKind::Structure(structure) => {
                    for member in &structure.members {
                        self.check_target(shape, member.label(), member)?;
                    }
                    if let Some(payload) = &structure.payload {
                        if structure.member(payload).is_none() {
                            return Err(ModelError::UnknownPayload {
                                shape: shape.name.to_string(),
                                payload: payload.clone(),
                            });
                        }
                    }
                }
                ShapeKind::List(list) => {
                    self.check_target(shape, "member", &list.member)?;
                    self.check_list_nesting(shape)?;
                }
                ShapeKind::Map(map) => {
                    self.check_target(shape, "key", &map.key)?;
                    self.check_target(shape, "value", &map.value)?;
                }
                _ => {}
            }
        }
        for operation in self.operations.values() {
            if let Some(input) = &operation.input {
                self.shape(input)?;
            }
        }
        Ok(())
    }

    /// Lists nested directly in lists must bottom out; only structures may
    /// close a cycle.
    fn check_list_nesting(&self, list: &Shape) -> ModelResult<()> {
        let mut seen = vec![&list.name];
        let mut current = list;
        while let ShapeKind::List(inner) = &current.kind {
            let Some(next) = self.shapes.get(&inner.member.shape) else {
                return Ok(());
            };
            if seen.contains(&&next.name) {
                return Err(ModelError::RecursiveList(list.name.to_string()));
            }
            seen.push(&next.name);
            current = next;
        }
        Ok(())
    }

    fn check_target(&self, owner: &Shape, member_name: &str, member: &Member) -> ModelResult<()> {
        if self.shapes.contains_key(&member.shape) {
            Ok(())
        } else {
            Err(ModelError::DanglingReference {
                owner: owner.name.to_string(),
                member: member_name.to_owned(),
                target: member.shape.to_string(),
            })
        }
    }
}
