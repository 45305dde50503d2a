//! Backing document store for the Arka archive engine.
//!
//! One [`Document`] is the persisted record for one archived object. It
//! holds primitive field values inline and a [`BlobRef`] (content hash +
//! codec id) for every field offloaded to the blob layer. Documents are
//! grouped into named collections, one per application object type.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] — `HashMap`-based store for tests and
//!   embedding
//!
//! # Design Rules
//!
//! 1. The store never interprets field values; it persists what it is given.
//! 2. Every operation is a single bounded round trip; timeouts and lost
//!    connections surface as [`DocError`], never as a hang.
//! 3. Nothing is retried or swallowed inside the store; retry policy belongs
//!    to the caller.

pub mod document;
pub mod error;
pub mod memory;
pub mod traits;

pub use document::{BlobRef, Document, FieldSlot};
pub use error::{DocError, DocResult};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
