//! The Arka archive engine.
//!
//! [`Archive`] persists [`arka_types::Record`]s into one backing document
//! per record, offloading complex or oversized field values into the
//! content-addressed blob store and reconstructing full records on read.
//!
//! # Data Flow
//!
//! - `save`: classify fields, write primitives inline into the document,
//!   encode complex values and `put` them into the blob store with this
//!   document as owner, and record each field's hash and codec in the
//!   document.
//! - `load`: fetch the document, copy primitives directly, then fetch and
//!   decode each blob reference with the codec recorded at encode time and
//!   merge it into a freshly constructed record.
//! - `drop`: delete the document, then release every blob it owned; newly
//!   unowned blobs are garbage-collected by the store.
//!
//! The engine is synchronous and stateless per call. It holds no locks;
//! callers racing on the same blob hash serialize at the blob store's
//! atomic owner-set update. Store handles are explicit: construct them
//! once and hand them to [`Archive::new`].

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;

pub use classify::{classify, Classified};
pub use config::ArchiveConfig;
pub use engine::{Archive, FieldFailure, LoadOutcome};
pub use error::{ArchiveError, ArchiveResult};
