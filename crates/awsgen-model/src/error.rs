//! Error types for shape graph construction and lookup.

use std::path::PathBuf;

/// Errors raised while loading or querying a [`ShapeGraph`](crate::ShapeGraph).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("failed to read model file {path}: {source}")]
    Io {
        /// Path of the model file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The model document is not valid JSON for the expected layout.
    #[error("failed to parse service model: {0}")]
    Parse(#[from] serde_json::Error),

    /// A shape name was looked up but is not defined in the graph.
    #[error("unknown shape: {0}")]
    UnknownShape(String),

    /// An operation name was looked up but is not defined in the graph.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A member of `owner` targets a shape that does not exist.
    #[error("member `{member}` of shape `{owner}` targets undefined shape `{target}`")]
    DanglingReference {
        /// Shape declaring the member.
        owner: String,
        /// Member name (or `member`/`key`/`value` for collection elements).
        member: String,
        /// Missing target shape.
        target: String,
    },

    /// A list contains itself without an intervening structure.
    #[error("list `{0}` contains itself")]
    RecursiveList(String),

    /// A structure declares a payload that is not one of its members.
    #[error("structure `{shape}` declares payload `{payload}` which is not a member")]
    UnknownPayload {
        /// Structure shape.
        shape: String,
        /// Declared payload member name.
        payload: String,
    },
}

/// Convenience result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
