//! Core types and configuration for awsgen.
//!
//! This crate provides the pieces shared by every protocol serializer: the
//! generator configuration, the wire [`Protocol`] enumeration and the
//! [`RequestSerializer`] contract the request builder compiles against.

mod config;
mod error;
mod serializer;

pub use config::{AwsGenConfig, Protocol};
pub use error::{AwsGenError, AwsGenResult};
pub use serializer::RequestSerializer;
