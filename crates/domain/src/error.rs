//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while parsing harness inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not one of the known verbs.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The content type is not part of the known table.
    #[error("unknown content type: {0}")]
    UnknownContentType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
