use arka_types::{ContentHash, DocumentId};
use thiserror::Error;

/// Errors from blob store operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The owner has no blob bound under the attribute.
    #[error("no blob bound for owner {owner} attribute {attribute:?}")]
    NotBound {
        owner: DocumentId,
        attribute: String,
    },

    /// A referenced hash is absent from the store. Always surfaced; never
    /// silently defaulted to an empty payload.
    #[error("blob {hash} missing for attribute {attribute:?}")]
    MissingBlob {
        hash: ContentHash,
        attribute: String,
    },

    /// The store is unreachable. Fails fast; retry policy belongs to the
    /// caller.
    #[error("blob store unreachable: {0}")]
    Connection(String),

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;
