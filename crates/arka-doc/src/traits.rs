use arka_types::{DocumentId, Primitive};

use crate::document::Document;
use crate::error::DocResult;

/// Schemaless per-object document store, keyed by document id.
///
/// All implementations must satisfy these invariants:
/// - Every operation is one bounded round trip; unreachable backends are an
///   `Err`, never a hang.
/// - `upsert` replaces the whole document atomically; readers never observe
///   a half-written field map.
/// - All I/O errors are propagated, never silently ignored.
pub trait DocumentStore: Send + Sync {
    /// Read a document by id.
    ///
    /// Returns `Ok(None)` if no document exists under the id.
    fn get(&self, id: &DocumentId) -> DocResult<Option<Document>>;

    /// Insert or replace a document.
    fn upsert(&self, document: &Document) -> DocResult<()>;

    /// Delete a document by id. Returns `true` if it existed.
    fn delete(&self, id: &DocumentId) -> DocResult<bool>;

    /// Ids of every document in a collection, sorted.
    fn list(&self, collection: &str) -> DocResult<Vec<DocumentId>>;

    /// Documents in a collection whose inline field `field` equals `value`,
    /// sorted by id. Blob-backed fields never match.
    fn find(&self, collection: &str, field: &str, value: &Primitive) -> DocResult<Vec<Document>>;

    /// Number of documents in a collection.
    ///
    /// Default implementation lists and counts. Backends may override.
    fn count(&self, collection: &str) -> DocResult<usize> {
        Ok(self.list(collection)?.len())
    }
}
