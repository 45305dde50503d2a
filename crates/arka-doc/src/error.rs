use arka_types::DocumentId;
use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum DocError {
    /// The requested document was not found.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// The store is unreachable. Fails fast; retry policy belongs to the
    /// caller.
    #[error("document store unreachable: {0}")]
    Connection(String),

    /// Serialization or deserialization failure at the storage boundary.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for document store operations.
pub type DocResult<T> = Result<T, DocError>;
