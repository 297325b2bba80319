//! Generator configuration.
//!
//! Configuration is driven by environment variables with sensible defaults,
//! and can also be assembled with the typed builder.

use std::fmt;
use std::str::FromStr;

use awsgen_model::ShapeGraph;
use serde::{Deserialize, Serialize};
use tracing::warn;
use typed_builder::TypedBuilder;

use crate::error::{AwsGenError, AwsGenResult};

/// AWS wire protocols a service model can declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// REST with XML bodies (S3, CloudFront, Route 53).
    #[default]
    #[serde(rename = "rest-xml")]
    RestXml,
    /// REST with JSON bodies.
    #[serde(rename = "rest-json")]
    RestJson,
    /// JSON RPC.
    #[serde(rename = "json")]
    Json,
    /// Form-encoded query protocol.
    #[serde(rename = "query")]
    Query,
    /// EC2 flavour of the query protocol.
    #[serde(rename = "ec2")]
    Ec2,
}

impl Protocol {
    /// The protocol name as it appears in service metadata.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RestXml => "rest-xml",
            Self::RestJson => "rest-json",
            Self::Json => "json",
            Self::Query => "query",
            Self::Ec2 => "ec2",
        }
    }

    /// The protocol of a loaded model, or `fallback` when the model does not
    /// declare one.
    pub fn of_model(graph: &ShapeGraph, fallback: Self) -> AwsGenResult<Self> {
        let declared = graph.metadata().protocol.as_str();
        if declared.is_empty() {
            Ok(fallback)
        } else {
            declared.parse()
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = AwsGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rest-xml" => Ok(Self::RestXml),
            "rest-json" => Ok(Self::RestJson),
            "json" => Ok(Self::Json),
            "query" => Ok(Self::Query),
            "ec2" => Ok(Self::Ec2),
            other => Err(AwsGenError::Config(format!("unknown protocol: {other}"))),
        }
    }
}

/// Global configuration for awsgen.
///
/// # Examples
///
/// ```
/// use awsgen_core::AwsGenConfig;
///
/// let config = AwsGenConfig::default();
/// assert_eq!(config.log_level, "info");
/// assert!(config.xml_declaration);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AwsGenConfig {
    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Protocol assumed for models that do not declare one.
    #[builder(default)]
    pub protocol: Protocol,

    /// Whether XML documents start with an `<?xml ...?>` declaration.
    #[builder(default = true)]
    pub xml_declaration: bool,
}

impl Default for AwsGenConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            protocol: Protocol::default(),
            xml_declaration: true,
        }
    }
}

impl AwsGenConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOG_LEVEL` | `info` |
    /// | `AWSGEN_PROTOCOL` | `rest-xml` |
    /// | `AWSGEN_XML_DECLARATION` | `true` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("AWSGEN_PROTOCOL") {
            match v.parse() {
                Ok(protocol) => config.protocol = protocol,
                Err(e) => warn!(error = %e, "ignoring AWSGEN_PROTOCOL"),
            }
        }
        if let Ok(v) = std::env::var("AWSGEN_XML_DECLARATION") {
            config.xml_declaration = parse_bool(&v);
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
