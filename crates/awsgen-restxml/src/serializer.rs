//! The REST-XML implementation of [`RequestSerializer`].

use awsgen_core::{AwsGenConfig, Protocol, RequestSerializer};
use awsgen_model::{Operation, ShapeGraph, ShapeId, Value};
use bytes::Bytes;

use crate::error::{CompileError, SerializeError};
use crate::executor::Executor;
use crate::plan::{CompiledBody, Routine};

/// `Content-Type` of REST-XML document bodies.
pub const CONTENT_TYPE: &str = "application/xml";

/// Compiles and runs REST-XML request bodies.
#[derive(Debug, Clone, Copy)]
pub struct RestXmlSerializer {
    xml_declaration: bool,
}

impl Default for RestXmlSerializer {
    fn default() -> Self {
        Self {
            xml_declaration: true,
        }
    }
}

impl RestXmlSerializer {
    /// Create a serializer from the generator configuration.
    #[must_use]
    pub fn from_config(config: &AwsGenConfig) -> Self {
        Self {
            xml_declaration: config.xml_declaration,
        }
    }

    /// Choose whether documents start with an XML declaration.
    #[must_use]
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Run a compiled body against the operation input.
    pub fn serialize(
        &self,
        body: &CompiledBody,
        input: Option<&Value>,
    ) -> Result<Bytes, SerializeError> {
        Executor::new(body)
            .with_xml_declaration(self.xml_declaration)
            .run(input)
    }
}

impl RequestSerializer for RestXmlSerializer {
    type Body = CompiledBody;
    type Routine = Routine;
    type Error = CompileError;

    fn protocol(&self) -> Protocol {
        Protocol::RestXml
    }

    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn compile_body(
        &self,
        graph: &ShapeGraph,
        operation: &Operation,
    ) -> Result<CompiledBody, CompileError> {
        crate::body::compile_body(graph, operation)
    }

    fn compile_members(
        &self,
        graph: &ShapeGraph,
        structure: &ShapeId,
    ) -> Result<Routine, CompileError> {
        crate::emit::compile_members(graph, structure)
    }
}
