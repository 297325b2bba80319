//! Integration tests for awsgen.
//!
//! Each test loads a service model from `fixtures/`, compiles the request
//! body of one operation and runs it against a JSON request value, checking
//! the produced wire payload.
//!
//! Run them with:
//! ```text
//! cargo test -p awsgen-integration
//! ```

use std::path::PathBuf;
use std::sync::Once;

use awsgen_core::RequestSerializer;
use awsgen_model::{ShapeGraph, Value};
use awsgen_restxml::{CompileError, CompiledBody, RestXmlSerializer, SerializeError};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Path of a model under `fixtures/`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Load a model from `fixtures/`.
///
/// # Panics
///
/// Panics if the fixture is missing or invalid.
#[must_use]
pub fn load_fixture(name: &str) -> ShapeGraph {
    init_tracing();
    ShapeGraph::from_path(fixture_path(name)).expect("fixture should load")
}

/// Parse an inline model.
///
/// # Errors
///
/// Returns the loader error for invalid models.
pub fn parse_model(json: &str) -> awsgen_model::ModelResult<ShapeGraph> {
    init_tracing();
    ShapeGraph::from_json_str(json)
}

/// Compile the body of `operation`.
///
/// # Errors
///
/// Returns the compile error, if any.
///
/// # Panics
///
/// Panics if the operation is not in the model.
pub fn compile(graph: &ShapeGraph, operation: &str) -> Result<CompiledBody, CompileError> {
    let operation = graph.operation(operation).expect("operation should exist");
    RestXmlSerializer::default().compile_body(graph, operation)
}

/// Compile and run the body of `operation` against a JSON request value,
/// without the XML declaration.
///
/// # Errors
///
/// Returns the execution error, if any.
///
/// # Panics
///
/// Panics if the operation does not compile.
pub fn try_serialize(
    graph: &ShapeGraph,
    operation: &str,
    input: serde_json::Value,
) -> Result<bytes::Bytes, SerializeError> {
    let body = compile(graph, operation).expect("operation should compile");
    let value = Value::from_json(input);
    RestXmlSerializer::default()
        .with_xml_declaration(false)
        .serialize(&body, value.as_ref())
}

/// Like [`try_serialize`], returning the body as text.
///
/// # Panics
///
/// Panics if serialization fails or the body is not UTF-8.
#[must_use]
pub fn serialize(graph: &ShapeGraph, operation: &str, input: serde_json::Value) -> String {
    let bytes = try_serialize(graph, operation, input).expect("body should serialize");
    String::from_utf8(bytes.to_vec()).expect("valid UTF-8")
}

mod test_errors;
mod test_payload;
mod test_structures;
