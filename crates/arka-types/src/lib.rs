//! Foundation types for the Arka archive engine.
//!
//! This crate provides the identifier and value types used throughout the
//! Arka system. Every other Arka crate depends on `arka-types`.
//!
//! # Key Types
//!
//! - [`ContentHash`] — Content-addressed blob identifier (BLAKE3 hash)
//! - [`DocumentId`] — UUID v7 identifier for an archived document
//! - [`CodecId`] — Stable identifier for the codec that produced a blob
//! - [`Primitive`] — Values the backing document represents inline
//! - [`ComplexValue`] — Values that require a codec and blob storage
//! - [`Record`] — An in-memory object: named fields plus optional identity

pub mod codec;
pub mod error;
pub mod hash;
pub mod id;
pub mod value;

pub use codec::CodecId;
pub use error::TypeError;
pub use hash::ContentHash;
pub use id::DocumentId;
pub use value::{ComplexKind, ComplexValue, FieldValue, Primitive, Record};
