use std::collections::HashMap;
use std::sync::RwLock;

use arka_types::{DocumentId, Primitive};

use crate::document::{Document, FieldSlot};
use crate::error::DocResult;
use crate::traits::DocumentStore;

/// In-memory, `HashMap`-based document store.
///
/// Intended for tests and embedding. All documents are held in memory behind
/// a `RwLock` and cloned on read/write.
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }

    /// Remove all documents.
    pub fn clear(&self) {
        self.documents.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, id: &DocumentId) -> DocResult<Option<Document>> {
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn upsert(&self, document: &Document) -> DocResult<()> {
        let mut map = self.documents.write().expect("lock poisoned");
        map.insert(document.id, document.clone());
        Ok(())
    }

    fn delete(&self, id: &DocumentId) -> DocResult<bool> {
        let mut map = self.documents.write().expect("lock poisoned");
        Ok(map.remove(id).is_some())
    }

    fn list(&self, collection: &str) -> DocResult<Vec<DocumentId>> {
        let map = self.documents.read().expect("lock poisoned");
        let mut ids: Vec<DocumentId> = map
            .values()
            .filter(|doc| doc.collection == collection)
            .map(|doc| doc.id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn find(&self, collection: &str, field: &str, value: &Primitive) -> DocResult<Vec<Document>> {
        let map = self.documents.read().expect("lock poisoned");
        let mut matches: Vec<Document> = map
            .values()
            .filter(|doc| doc.collection == collection)
            .filter(|doc| {
                matches!(doc.field(field), Some(FieldSlot::Inline(v)) if v == value)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|doc| doc.id);
        Ok(matches)
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlobRef;
    use arka_types::{CodecId, ContentHash};

    fn make_doc(collection: &str, name: &str) -> Document {
        let mut doc = Document::new(DocumentId::new(), collection);
        doc.set_inline("name", Primitive::Text(name.into()));
        doc
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn upsert_and_get() {
        let store = InMemoryDocumentStore::new();
        let doc = make_doc("samples", "a");
        store.upsert(&doc).unwrap();

        let read_back = store.get(&doc.id).unwrap().expect("should exist");
        assert_eq!(read_back, doc);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get(&DocumentId::new()).unwrap().is_none());
    }

    #[test]
    fn upsert_replaces_whole_document() {
        let store = InMemoryDocumentStore::new();
        let mut doc = make_doc("samples", "a");
        doc.set_inline("stale", Primitive::Int(1));
        store.upsert(&doc).unwrap();

        doc.remove_field("stale");
        doc.set_inline("fresh", Primitive::Int(2));
        store.upsert(&doc).unwrap();

        let read_back = store.get(&doc.id).unwrap().unwrap();
        assert!(read_back.field("stale").is_none());
        assert!(read_back.field("fresh").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_present_and_missing() {
        let store = InMemoryDocumentStore::new();
        let doc = make_doc("samples", "a");
        store.upsert(&doc).unwrap();

        assert!(store.delete(&doc.id).unwrap());
        assert!(!store.delete(&doc.id).unwrap());
        assert!(store.get(&doc.id).unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    #[test]
    fn list_filters_by_collection_and_sorts() {
        let store = InMemoryDocumentStore::new();
        let a = make_doc("samples", "a");
        let b = make_doc("samples", "b");
        let other = make_doc("models", "m");
        store.upsert(&a).unwrap();
        store.upsert(&b).unwrap();
        store.upsert(&other).unwrap();

        let ids = store.list("samples").unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a.id));
        assert!(ids.contains(&b.id));
        for w in ids.windows(2) {
            assert!(w[0] <= w[1]);
        }
        assert_eq!(store.list("models").unwrap(), vec![other.id]);
        assert!(store.list("absent").unwrap().is_empty());
    }

    #[test]
    fn count_uses_collection() {
        let store = InMemoryDocumentStore::new();
        store.upsert(&make_doc("samples", "a")).unwrap();
        store.upsert(&make_doc("samples", "b")).unwrap();
        store.upsert(&make_doc("models", "m")).unwrap();

        assert_eq!(store.count("samples").unwrap(), 2);
        assert_eq!(store.count("models").unwrap(), 1);
        assert_eq!(store.count("absent").unwrap(), 0);
    }

    // -----------------------------------------------------------------------
    // Filtered query
    // -----------------------------------------------------------------------

    #[test]
    fn find_matches_inline_values() {
        let store = InMemoryDocumentStore::new();
        let a = make_doc("samples", "target");
        let b = make_doc("samples", "target");
        let c = make_doc("samples", "other");
        store.upsert(&a).unwrap();
        store.upsert(&b).unwrap();
        store.upsert(&c).unwrap();

        let found = store
            .find("samples", "name", &Primitive::Text("target".into()))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.id == a.id || d.id == b.id));
    }

    #[test]
    fn find_never_matches_blob_fields() {
        let store = InMemoryDocumentStore::new();
        let mut doc = Document::new(DocumentId::new(), "samples");
        doc.set_blob(
            "payload",
            BlobRef::new(ContentHash::of(b"data"), CodecId::new("bincode/1")),
        );
        store.upsert(&doc).unwrap();

        let found = store
            .find("samples", "payload", &Primitive::Text("data".into()))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn find_respects_collection_boundary() {
        let store = InMemoryDocumentStore::new();
        store.upsert(&make_doc("samples", "x")).unwrap();

        let found = store
            .find("models", "name", &Primitive::Text("x".into()))
            .unwrap();
        assert!(found.is_empty());
    }

    // -----------------------------------------------------------------------
    // Utility
    // -----------------------------------------------------------------------

    #[test]
    fn clear_removes_all() {
        let store = InMemoryDocumentStore::new();
        store.upsert(&make_doc("samples", "a")).unwrap();
        store.upsert(&make_doc("models", "m")).unwrap();
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryDocumentStore::new());
        let doc = make_doc("samples", "shared");
        store.upsert(&doc).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = doc.id;
                thread::spawn(move || {
                    let read = store.get(&id).unwrap();
                    assert!(read.is_some());
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}
