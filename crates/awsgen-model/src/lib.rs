//! Service shape graph for awsgen.
//!
//! This crate holds the read-only inputs the protocol serializers compile
//! from: the shape graph (structures, lists, maps and scalars connected by
//! member edges), the operations that reference it, and the dynamic request
//! [`Value`] a compiled serializer runs against.
//!
//! # Key components
//!
//! - [`ShapeGraph`], [`Shape`], [`Member`] and [`Operation`] describe a service
//! - [`Value`] is the request object graph handed to compiled serializers
//! - [`ShapeGraph::from_json_str`] loads a botocore-style JSON service description

mod error;
pub mod loader;
pub mod shape;
pub mod value;

pub use error::{ModelError, ModelResult};
pub use shape::{
    ListShape, Location, MapShape, Member, Operation, ServiceMetadata, Shape, ShapeGraph, ShapeId,
    ShapeKind, StructureShape, XmlNamespace,
};
pub use value::Value;
