//! Loading a botocore-style JSON service description into a [`ShapeGraph`].
//!
//! Only the parts the request serializers need are read: `metadata`,
//! `operations[*].input` and `shapes`. Member order follows the order of the
//! `members` object in the document.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::shape::{
    ListShape, Location, MapShape, Member, Operation, ServiceMetadata, Shape, ShapeGraph, ShapeId,
    ShapeKind, StructureShape, XmlNamespace,
};

/// Top-level service description document.
#[derive(Debug, Deserialize)]
struct RawModel {
    #[serde(default)]
    metadata: ServiceMetadata,
    #[serde(default)]
    operations: IndexMap<String, RawOperation>,
    #[serde(default)]
    shapes: IndexMap<String, RawShape>,
}

#[derive(Debug, Deserialize)]
struct RawOperation {
    name: Option<String>,
    input: Option<RawShapeRef>,
}

#[derive(Debug, Deserialize)]
struct RawShapeRef {
    shape: String,
}

/// A single shape definition, tagged by its `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawShape {
    Structure(RawStructure),
    List(RawList),
    Map(RawMap),
    String(RawScalar),
    Blob(RawScalar),
    Boolean(RawScalar),
    Integer(RawScalar),
    Long(RawScalar),
    Float(RawScalar),
    Double(RawScalar),
    Timestamp(RawScalar),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStructure {
    #[serde(default)]
    members: IndexMap<String, RawMember>,
    #[serde(default)]
    required: Vec<String>,
    payload: Option<String>,
    xml_namespace: Option<XmlNamespace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawList {
    member: RawMember,
    #[serde(default)]
    flattened: bool,
    xml_namespace: Option<XmlNamespace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMap {
    key: RawMember,
    value: RawMember,
    #[serde(default)]
    flattened: bool,
    xml_namespace: Option<XmlNamespace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScalar {
    #[serde(default)]
    streaming: bool,
    xml_namespace: Option<XmlNamespace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    shape: String,
    location_name: Option<String>,
    location: Option<Location>,
    #[serde(default)]
    xml_attribute: bool,
    xml_namespace: Option<XmlNamespace>,
    #[serde(default)]
    streaming: bool,
}

impl RawMember {
    fn into_member(self, name: Option<String>, required: bool, payload: bool) -> Member {
        Member {
            name,
            shape: ShapeId::new(self.shape),
            location_name: self.location_name,
            location: self.location.unwrap_or_default(),
            required,
            xml_attribute: self.xml_attribute,
            xml_namespace: self.xml_namespace,
            payload,
            streaming: self.streaming,
        }
    }
}

impl RawShape {
    fn into_shape(self, name: String) -> Shape {
        let (kind, xml_namespace, streaming) = match self {
            Self::Structure(s) => {
                let payload = s.payload;
                let members = s
                    .members
                    .into_iter()
                    .map(|(member_name, raw)| {
                        let required = s.required.contains(&member_name);
                        let is_payload = payload.as_deref() == Some(member_name.as_str());
                        raw.into_member(Some(member_name), required, is_payload)
                    })
                    .collect();
                (
                    ShapeKind::Structure(StructureShape { members, payload }),
                    s.xml_namespace,
                    false,
                )
            }
            Self::List(l) => (
                ShapeKind::List(ListShape {
                    member: l.member.into_member(None, false, false),
                    flattened: l.flattened,
                }),
                l.xml_namespace,
                false,
            ),
            Self::Map(m) => (
                ShapeKind::Map(MapShape {
                    key: m.key.into_member(None, false, false),
                    value: m.value.into_member(None, false, false),
                    flattened: m.flattened,
                }),
                m.xml_namespace,
                false,
            ),
            Self::String(s) => (ShapeKind::String, s.xml_namespace, s.streaming),
            Self::Blob(s) => (ShapeKind::Blob, s.xml_namespace, s.streaming),
            Self::Boolean(s) => (ShapeKind::Boolean, s.xml_namespace, s.streaming),
            Self::Integer(s) => (ShapeKind::Integer, s.xml_namespace, s.streaming),
            Self::Long(s) => (ShapeKind::Long, s.xml_namespace, s.streaming),
            Self::Float(s) => (ShapeKind::Float, s.xml_namespace, s.streaming),
            Self::Double(s) => (ShapeKind::Double, s.xml_namespace, s.streaming),
            Self::Timestamp(s) => (ShapeKind::Timestamp, s.xml_namespace, s.streaming),
        };
        Shape {
            name: ShapeId::new(name),
            kind,
            xml_namespace,
            streaming,
        }
    }
}

impl ShapeGraph {
    /// Parse a JSON service description and validate its references.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let raw: RawModel = serde_json::from_str(json)?;

        let mut graph = ShapeGraph::new(raw.metadata);
        for (name, shape) in raw.shapes {
            graph.insert_shape(shape.into_shape(name));
        }
        for (key, op) in raw.operations {
            let name = op.name.unwrap_or(key);
            graph.insert_operation(Operation::new(
                name,
                op.input.map(|r| ShapeId::new(r.shape)),
            ));
        }
        graph.validate()?;

        debug!(
            protocol = %graph.metadata().protocol,
            shapes = graph.shapes().count(),
            operations = graph.operations().count(),
            "loaded service model"
        );
        Ok(graph)
    }

    /// Read and parse a JSON service description from a file.
    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
