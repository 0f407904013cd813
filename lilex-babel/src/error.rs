//! Error types for format operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Unknown format {0}")]
    FormatNotFound(String),

    /// The format exists but cannot do the requested direction.
    #[error("{0}")]
    NotSupported(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
