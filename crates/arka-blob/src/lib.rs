//! Content-addressed blob storage for the Arka archive engine.
//!
//! Encoded field values are stored once per unique content hash and shared
//! between every document that produced the same bytes. Each blob record
//! carries an owner set (the document ids currently depending on it) and
//! is physically deleted the moment that set becomes empty.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] — `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Blob bytes are immutable once written; content addressing guarantees
//!    the same bytes always land on the same record.
//! 2. Owner-set mutation is a single atomic conditional update at the
//!    storage layer, never a read-then-write. Concurrent owners racing on
//!    one hash serialize there and nowhere else.
//! 3. On rebinding, join the new record before releasing the displaced one,
//!    so a blob still bound elsewhere is never deleted in between.
//! 4. A blob is deleted exactly when its owner set empties; orphan records
//!    never linger.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{BlobError, BlobResult};
pub use memory::InMemoryBlobStore;
pub use record::{BlobKey, BlobPayload, BlobRecord, PutReceipt};
pub use traits::BlobStore;
