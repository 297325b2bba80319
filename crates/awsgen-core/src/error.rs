//! Error types for awsgen core.

/// Core error type for awsgen.
#[derive(Debug, thiserror::Error)]
pub enum AwsGenError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested protocol has no serializer in this build.
    #[error("no request serializer for protocol `{0}`")]
    UnsupportedProtocol(String),
}

/// Convenience result type for awsgen operations.
pub type AwsGenResult<T> = Result<T, AwsGenError>;
