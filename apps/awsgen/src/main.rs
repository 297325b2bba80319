//! awsgen - REST-XML request body compiler.
//!
//! Loads a service model, compiles the request-body serializer of an
//! operation and either prints the compiled program or runs it against a JSON
//! request value.
//!
//! # Usage
//!
//! ```text
//! awsgen operations s3.json
//! awsgen compile s3.json PutBucketTagging
//! awsgen serialize s3.json PutBucketTagging --input request.json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `AWSGEN_PROTOCOL` | `rest-xml` | Protocol for models without `metadata.protocol` |
//! | `AWSGEN_XML_DECLARATION` | `true` | Start documents with `<?xml ...?>` |

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use awsgen_core::{AwsGenConfig, AwsGenError, Protocol, RequestSerializer};
use awsgen_model::{ShapeGraph, Value};
use awsgen_restxml::{BodyPlan, RestXmlSerializer};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "awsgen", version)]
#[command(about = "Compile REST-XML request body serializers from a service model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the operations of a model and the kind of body each one sends
    Operations {
        /// Service model (JSON)
        model: PathBuf,
    },
    /// Print the compiled body program of an operation as JSON
    Compile {
        /// Service model (JSON)
        model: PathBuf,
        /// Operation name
        operation: String,
    },
    /// Serialize a JSON request value into the operation's body
    Serialize {
        /// Service model (JSON)
        model: PathBuf,
        /// Operation name
        operation: String,
        /// Request value (JSON); no input means an empty request
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Omit the XML declaration
        #[arg(long)]
        no_declaration: bool,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Load a model and check that it speaks REST-XML.
fn load_model(path: &Path, config: &AwsGenConfig) -> Result<ShapeGraph> {
    let graph = ShapeGraph::from_path(path)
        .with_context(|| format!("failed to load model {}", path.display()))?;

    let protocol = Protocol::of_model(&graph, config.protocol)?;
    if protocol != Protocol::RestXml {
        return Err(AwsGenError::UnsupportedProtocol(protocol.to_string()).into());
    }

    info!(
        model = %path.display(),
        shapes = graph.shapes().count(),
        operations = graph.operations().count(),
        "loaded model"
    );
    Ok(graph)
}

fn read_input(path: &Path) -> Result<Option<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    Ok(Value::from_json(json))
}

fn list_operations(graph: &ShapeGraph, serializer: &RestXmlSerializer) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for operation in graph.operations() {
        let kind = match serializer.compile_body(graph, operation) {
            Ok(body) => match body.plan {
                BodyPlan::Empty => "empty".to_owned(),
                BodyPlan::Raw { field } => format!("raw ({field})"),
                BodyPlan::Document { root, .. } => format!("xml ({root})"),
            },
            Err(e) => format!("error: {e}"),
        };
        writeln!(out, "{}\t{kind}", operation.name)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AwsGenConfig::from_env();
    init_tracing(&config.log_level)?;
    debug!(?config, "loaded configuration");

    let serializer = RestXmlSerializer::from_config(&config);

    match cli.command {
        Commands::Operations { model } => {
            let graph = load_model(&model, &config)?;
            list_operations(&graph, &serializer)?;
        }
        Commands::Compile { model, operation } => {
            let graph = load_model(&model, &config)?;
            let operation = graph.operation(&operation)?;
            let body = serializer
                .compile_body(&graph, operation)
                .with_context(|| format!("failed to compile {}", operation.name))?;

            let json = serde_json::to_string_pretty(&body)?;
            println!("{json}");
        }
        Commands::Serialize {
            model,
            operation,
            input,
            no_declaration,
        } => {
            let graph = load_model(&model, &config)?;
            let operation = graph.operation(&operation)?;
            let body = serializer
                .compile_body(&graph, operation)
                .with_context(|| format!("failed to compile {}", operation.name))?;

            let value = match input {
                Some(path) => read_input(&path)?,
                None => None,
            };
            if value.as_ref().is_some_and(|v| v.as_structure().is_none()) {
                bail!("request value of {} must be a JSON object", operation.name);
            }

            let serializer = if no_declaration {
                serializer.with_xml_declaration(false)
            } else {
                serializer
            };
            let bytes = serializer
                .serialize(&body, value.as_ref())
                .with_context(|| format!("failed to serialize {}", operation.name))?;

            info!(
                operation = %operation.name,
                content_type = serializer.content_type(),
                len = bytes.len(),
                "serialized request body"
            );
            let mut out = std::io::stdout().lock();
            out.write_all(&bytes)?;
            out.flush()?;
        }
    }

    Ok(())
}
