//! Error types for compiling and executing REST-XML body programs.
//!
//! [`CompileError`] is raised while generating the serializer and always names
//! the offending shape or member. [`SerializeError`] is raised when a compiled
//! program runs against a request value that does not fit it.

use std::io;

use awsgen_model::{ModelError, ShapeId};

/// Generation-time failures.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A shape reference could not be resolved.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A structure was expected.
    #[error("shape `{shape}` is a {kind}, expected a structure")]
    NotAStructure {
        /// Offending shape.
        shape: ShapeId,
        /// Its actual kind.
        kind: &'static str,
    },

    /// Map shapes have no REST-XML body serialization.
    #[error("shape `{shape}` is a map, which is not supported in REST-XML request bodies")]
    UnsupportedMap {
        /// Offending map shape.
        shape: ShapeId,
    },

    /// A scalar kind the serializer does not handle.
    #[error("type {kind} is not yet implemented (shape `{shape}`)")]
    UnsupportedType {
        /// Offending shape.
        shape: ShapeId,
        /// Its type name.
        kind: &'static str,
    },

    /// A boolean member was marked as an XML attribute.
    #[error("unsupported combination: boolean member `{member}` cannot be an XML attribute")]
    BooleanAttribute {
        /// Offending member.
        member: String,
    },

    /// A payload member whose shape cannot form a body.
    #[error("payload member `{member}` of `{shape}` is a {kind}, which cannot form a request body")]
    UnsupportedPayload {
        /// Input structure declaring the payload.
        shape: ShapeId,
        /// Payload member.
        member: String,
        /// Type of the payload shape.
        kind: &'static str,
    },

    /// The document root would receive an attribute.
    #[error("structure `{shape}` is serialized at the document root but sets an XML attribute")]
    AttributeOnDocument {
        /// Root structure shape.
        shape: ShapeId,
    },

    /// A failure inside one member of a structure.
    #[error("{structure}.{member}: {source}")]
    Member {
        /// Structure declaring the member.
        structure: ShapeId,
        /// Member name.
        member: String,
        /// Underlying failure.
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Attach the `structure.member` location to this error.
    #[must_use]
    pub fn in_member(self, structure: &ShapeId, member: &str) -> Self {
        Self::Member {
            structure: structure.clone(),
            member: member.to_owned(),
            source: Box::new(self),
        }
    }

    /// The innermost error, without member context.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Member { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Failures while executing a compiled program.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A value the program writes unconditionally is absent.
    #[error("missing required value for `{0}`")]
    MissingValue(String),

    /// A value of the wrong kind for the compiled shape.
    #[error("`{name}` expects a {expected} value, found {found}")]
    TypeMismatch {
        /// Element, attribute or field name.
        name: String,
        /// Expected value kind.
        expected: &'static str,
        /// Actual value kind.
        found: &'static str,
    },

    /// Blob text that is not UTF-8.
    #[error("`{0}` is not valid UTF-8 text")]
    InvalidUtf8(String),

    /// The program references a routine it does not contain.
    #[error("no compiled routine for shape `{0}`")]
    MissingRoutine(ShapeId),

    /// An attribute write reached the document node.
    #[error("cannot set attribute `{0}` on the document node")]
    AttributeOnDocument(String),
}
