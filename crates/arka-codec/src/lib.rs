//! Pluggable value codecs for the Arka archive engine.
//!
//! A codec turns a [`arka_types::FieldValue`] into bytes and back. Every
//! blob in the store records the id of the codec that produced it, and
//! decoding always resolves by that stored id, never by the registry's
//! current type mapping, so registry changes never break existing archives.
//!
//! # Codec Laws
//!
//! 1. Determinism: equal logical values produce byte-identical output under
//!    the same codec. Deduplication depends on this.
//! 2. Round trip: `decode(encode(v)) == v`.
//! 3. A codec asked to encode a value outside its domain returns a typed
//!    error; it never panics.
//!
//! # Built-in Codecs
//!
//! - [`BincodeCodec`] (`bincode/1`) — the default generic codec; encodes any
//!   field value
//! - [`F64ArrayCodec`] (`f64le/1`) — fixed little-endian layout for dense
//!   numeric arrays
//! - [`JsonCodec`] (`json/1`) — schemaless structured values

pub mod builtin;
pub mod error;
pub mod registry;
pub mod traits;

pub use builtin::{BincodeCodec, F64ArrayCodec, JsonCodec};
pub use error::{CodecError, CodecResult};
pub use registry::CodecRegistry;
pub use traits::Codec;
