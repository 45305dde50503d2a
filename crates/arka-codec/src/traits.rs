use arka_types::{CodecId, FieldValue};

use crate::error::CodecResult;

/// An encode/decode pair bound to a stable identifier.
///
/// Implementations must satisfy the codec laws:
/// - `encode` is deterministic: equal logical values produce byte-identical
///   output. The blob store's deduplication depends on this.
/// - `decode` exactly inverts `encode`.
/// - A value outside the codec's domain is an `Err`, never a panic.
///
/// The id is persisted with every blob the codec produces. Treat it as a
/// wire format: changing the encoding requires a new id (`f64le/2`), with
/// the old codec kept registered for decoding existing archives.
pub trait Codec: Send + Sync + std::fmt::Debug {
    /// The stable identifier persisted with blobs this codec produces.
    fn id(&self) -> CodecId;

    /// Serialize a field value to bytes.
    fn encode(&self, value: &FieldValue) -> CodecResult<Vec<u8>>;

    /// Reconstruct the field value from bytes produced by `encode`.
    fn decode(&self, bytes: &[u8]) -> CodecResult<FieldValue>;
}
