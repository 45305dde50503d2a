use arka_types::CodecId;
use thiserror::Error;

/// Errors from encode/decode operations and codec resolution.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value cannot be serialized by the resolved codec.
    #[error("encode failed ({codec}): {reason}")]
    Encode { codec: CodecId, reason: String },

    /// The stored bytes are unreadable under the recorded codec.
    #[error("decode failed ({codec}): {reason}")]
    Decode { codec: CodecId, reason: String },

    /// The codec does not handle values of this kind.
    #[error("codec {codec} does not encode {kind} values")]
    UnsupportedKind { codec: CodecId, kind: &'static str },

    /// No codec is registered under the stored id.
    #[error("unknown codec id: {0}")]
    UnknownCodec(CodecId),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
