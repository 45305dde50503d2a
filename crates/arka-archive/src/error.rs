use arka_blob::BlobError;
use arka_codec::CodecError;
use arka_doc::DocError;
use arka_types::DocumentId;
use thiserror::Error;

/// Errors from archive operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// No document exists under the id.
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Encode or decode failure, or an unresolvable codec id.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Document store failure.
    #[error("document store error: {0}")]
    Doc(#[from] DocError),

    /// Blob store failure.
    #[error("blob store error: {0}")]
    Blob(#[from] BlobError),
}

/// Result alias for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
