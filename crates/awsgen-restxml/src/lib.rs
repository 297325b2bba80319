//! REST-XML request body compiler for awsgen.
//!
//! This crate compiles the input shapes of REST-XML operations into a small
//! program ([`XmlOp`]s grouped into per-structure [`Routine`]s) and executes
//! that program against a request [`Value`](awsgen_model::Value) to produce the
//! XML wire payload.
//!
//! # Key components
//!
//! - [`RestXmlSerializer`] implements the [`RequestSerializer`](awsgen_core::RequestSerializer) contract
//! - [`compile_body`] decides between an empty, raw (streaming) or XML body
//! - [`compile_members`] compiles the reusable routine of one structure shape
//! - [`Executor`] runs a [`CompiledBody`] and writes the document with `quick-xml`
//!
//! # REST-XML conventions
//!
//! - Members bound to headers, URI labels or the query string are skipped
//! - Element names come from `locationName`, then the member name, then `member`
//! - Booleans are written as lowercase `true`/`false`
//! - Flattened lists repeat their element at the parent level
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

mod body;
mod emit;
pub mod error;
pub mod executor;
pub mod naming;
pub mod plan;
mod serializer;

pub use body::{compile_body, compile_routines};
pub use emit::compile_members;
pub use error::{CompileError, SerializeError};
pub use executor::Executor;
pub use plan::{BodyPlan, CompiledBody, InputRef, NamespaceAttr, Routine, XmlOp};
pub use serializer::{CONTENT_TYPE, RestXmlSerializer};
