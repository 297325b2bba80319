//! The contract every protocol request serializer satisfies.

use awsgen_model::{Operation, ShapeGraph, ShapeId};

use crate::config::Protocol;

/// Compiles request-body serialization logic for one wire protocol.
///
/// The request builder asks the serializer for the operation's body logic and
/// for the reusable per-structure routine; both are compiled once from the
/// immutable shape graph and may be executed any number of times.
pub trait RequestSerializer {
    /// Compiled body logic for one operation.
    type Body;
    /// Compiled per-structure routine.
    type Routine;
    /// Generation-time failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The protocol implemented by this serializer.
    fn protocol(&self) -> Protocol;

    /// The `Content-Type` of serialized bodies.
    fn content_type(&self) -> &'static str;

    /// Compile the body logic of `operation`.
    fn compile_body(
        &self,
        graph: &ShapeGraph,
        operation: &Operation,
    ) -> Result<Self::Body, Self::Error>;

    /// Compile the routine serializing the members of `structure`.
    fn compile_members(
        &self,
        graph: &ShapeGraph,
        structure: &ShapeId,
    ) -> Result<Self::Routine, Self::Error>;
}
