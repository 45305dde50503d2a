use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arka_types::{CodecId, ContentHash, DocumentId, Primitive};

/// Pointer from a document field to an offloaded blob: the content hash the
/// encoded bytes live under, plus the id of the codec that produced them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    pub hash: ContentHash,
    pub codec: CodecId,
}

impl BlobRef {
    pub fn new(hash: ContentHash, codec: CodecId) -> Self {
        Self { hash, codec }
    }
}

/// One persisted field: a primitive stored inline, or a reference to a blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldSlot {
    Inline(Primitive),
    Blob(BlobRef),
}

impl FieldSlot {
    /// The blob reference, if this field is offloaded.
    pub fn blob_ref(&self) -> Option<&BlobRef> {
        match self {
            Self::Blob(blob_ref) => Some(blob_ref),
            Self::Inline(_) => None,
        }
    }
}

/// The persisted record for one archived object instance.
///
/// Created on first save, updated in place on each subsequent save, removed
/// on drop. `created_at` is fixed at creation; `updated_at` moves on every
/// completed save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub collection: String,
    pub fields: BTreeMap<String, FieldSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create an empty document in a collection, stamped with the current
    /// time.
    pub fn new(id: DocumentId, collection: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            collection: collection.into(),
            fields: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a field slot by name.
    pub fn field(&self, name: &str) -> Option<&FieldSlot> {
        self.fields.get(name)
    }

    /// Store a primitive inline.
    pub fn set_inline(&mut self, name: impl Into<String>, value: Primitive) {
        self.fields.insert(name.into(), FieldSlot::Inline(value));
    }

    /// Bind a field to an offloaded blob.
    pub fn set_blob(&mut self, name: impl Into<String>, blob_ref: BlobRef) {
        self.fields.insert(name.into(), FieldSlot::Blob(blob_ref));
    }

    /// Remove a field, returning its slot if present.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldSlot> {
        self.fields.remove(name)
    }

    /// Iterate the blob-backed fields in name order.
    pub fn blob_refs(&self) -> impl Iterator<Item = (&str, &BlobRef)> {
        self.fields
            .iter()
            .filter_map(|(name, slot)| slot.blob_ref().map(|r| (name.as_str(), r)))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
