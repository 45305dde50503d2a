use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use arka_blob::BlobStore;
use arka_codec::{Codec, CodecError, CodecRegistry};
use arka_doc::{BlobRef, Document, DocumentStore, FieldSlot};
use arka_types::{CodecId, ContentHash, DocumentId, FieldValue, Primitive, Record};

use crate::classify::classify;
use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, ArchiveResult};

/// One field that could not be reconstructed on load.
#[derive(Debug)]
pub struct FieldFailure {
    pub field: String,
    pub error: ArchiveError,
}

/// Result of a load: the reconstructed record plus per-field failures.
///
/// A decode failure or missing blob fails only its own field; the rest of
/// the record is still populated. Nothing is silently defaulted; every
/// unreconstructed field appears in `failures`.
#[derive(Debug)]
pub struct LoadOutcome {
    pub record: Record,
    pub failures: Vec<FieldFailure>,
}

impl LoadOutcome {
    /// Returns `true` if every field was reconstructed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A field encoded and ready for blob storage.
struct EncodedField {
    name: String,
    bytes: Vec<u8>,
    hash: ContentHash,
    codec: CodecId,
}

/// The archive engine: orchestrates the classifier, codec registry, and the
/// two stores against one backing document per archived record.
///
/// One `Archive` serves one collection (one application object type).
/// Stateless per call; safe to share across threads behind an `Arc`.
pub struct Archive {
    collection: String,
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    registry: CodecRegistry,
    config: ArchiveConfig,
}

impl Archive {
    /// Create an archive over explicit store handles with the default
    /// configuration.
    pub fn new(
        collection: impl Into<String>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        registry: CodecRegistry,
    ) -> Self {
        Self::with_config(collection, documents, blobs, registry, ArchiveConfig::default())
    }

    /// Create an archive with an explicit configuration.
    pub fn with_config(
        collection: impl Into<String>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        registry: CodecRegistry,
        config: ArchiveConfig,
    ) -> Self {
        Self {
            collection: collection.into(),
            documents,
            blobs,
            registry,
            config,
        }
    }

    /// The collection this archive serves.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persist a record.
    ///
    /// A record with no identity gets a fresh document; a bound record
    /// updates its existing document in place. Every complex (or oversized
    /// primitive) field is encoded before any store is touched, so an
    /// encode failure aborts with nothing written. For a bound record,
    /// fields whose encoding hashes identically to the currently bound blob
    /// skip the blob store entirely.
    pub fn save(&self, record: &mut Record) -> ArchiveResult<DocumentId> {
        let classified = classify(record, &self.config.excludes);

        let mut inline: Vec<(String, Primitive)> = Vec::new();
        let mut encoded: Vec<EncodedField> = Vec::new();
        for (name, value) in &classified.primitives {
            if self.primitive_encoded_size(value)? > self.config.offload_threshold as u64 {
                encoded.push(self.encode_field(
                    name,
                    &FieldValue::Primitive((*value).clone()),
                    self.registry.default_codec(),
                )?);
            } else {
                inline.push((name.to_string(), (*value).clone()));
            }
        }
        for (name, value) in &classified.complex {
            let codec = self.registry.resolve(value.kind());
            encoded.push(self.encode_field(
                name,
                &FieldValue::Complex((*value).clone()),
                codec,
            )?);
        }

        let (id, existing) = match record.id() {
            Some(id) => (id, self.documents.get(&id)?),
            None => (DocumentId::new(), None),
        };
        let mut document =
            existing.unwrap_or_else(|| Document::new(id, self.collection.clone()));

        let mut fields: BTreeMap<String, FieldSlot> = BTreeMap::new();
        for (name, value) in inline {
            fields.insert(name, FieldSlot::Inline(value));
        }
        let mut blob_writes = 0usize;
        for field in encoded {
            let bound = document.field(&field.name).and_then(FieldSlot::blob_ref);
            let slot = match bound {
                // Unchanged encoding: keep the existing reference, skip the
                // blob store entirely.
                Some(existing_ref) if existing_ref.hash == field.hash => {
                    FieldSlot::Blob(existing_ref.clone())
                }
                _ => {
                    let receipt =
                        self.blobs.put(&id, &field.name, &field.bytes, &field.codec)?;
                    blob_writes += 1;
                    FieldSlot::Blob(BlobRef::new(receipt.hash, field.codec))
                }
            };
            fields.insert(field.name, slot);
        }

        // Blob-backed fields that the new save no longer offloads: released
        // after the document commit, so the committed document never
        // references an already-deleted blob.
        let stale: Vec<String> = document
            .fields
            .iter()
            .filter(|(name, slot)| {
                slot.blob_ref().is_some()
                    && !matches!(fields.get(*name), Some(FieldSlot::Blob(_)))
            })
            .map(|(name, _)| name.clone())
            .collect();

        document.fields = fields;
        document.touch();
        self.documents.upsert(&document)?;
        for name in &stale {
            self.blobs.release(&id, name)?;
        }

        record.bind(id);
        debug!(
            collection = %self.collection,
            id = %id.short_id(),
            fields = document.len(),
            blob_writes,
            "saved record"
        );
        Ok(id)
    }

    /// Reconstruct the record stored under `id`.
    ///
    /// Primitives are copied directly; each blob reference is fetched and
    /// decoded with the codec recorded when the blob was written.
    pub fn load(&self, id: &DocumentId) -> ArchiveResult<LoadOutcome> {
        let document = self
            .documents
            .get(id)?
            .ok_or(ArchiveError::DocumentNotFound(*id))?;
        Ok(self.reconstruct(&document))
    }

    /// Reconstruct every record in the collection, in id order.
    pub fn load_all(&self) -> ArchiveResult<Vec<LoadOutcome>> {
        let ids = self.documents.list(&self.collection)?;
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            outcomes.push(self.load(&id)?);
        }
        Ok(outcomes)
    }

    /// Reconstruct the records whose inline field `field` equals `value`.
    pub fn find(&self, field: &str, value: &Primitive) -> ArchiveResult<Vec<LoadOutcome>> {
        let documents = self.documents.find(&self.collection, field, value)?;
        Ok(documents.iter().map(|doc| self.reconstruct(doc)).collect())
    }

    /// Ids of every record in the collection, sorted.
    pub fn ids(&self) -> ArchiveResult<Vec<DocumentId>> {
        Ok(self.documents.list(&self.collection)?)
    }

    /// Delete the document and release every blob it owned. Newly unowned
    /// blobs are garbage-collected by the store.
    ///
    /// Returns `true` if the document existed.
    pub fn drop(&self, id: &DocumentId) -> ArchiveResult<bool> {
        let existed = self.documents.delete(id)?;
        let released = self.blobs.drop_owner(id)?;
        debug!(
            collection = %self.collection,
            id = %id.short_id(),
            existed,
            released,
            "dropped record"
        );
        Ok(existed)
    }

    /// Drop every record in the collection. Returns the number dropped.
    pub fn drop_all(&self) -> ArchiveResult<usize> {
        let ids = self.documents.list(&self.collection)?;
        for id in &ids {
            self.drop(id)?;
        }
        Ok(ids.len())
    }

    fn reconstruct(&self, document: &Document) -> LoadOutcome {
        let mut record = Record::with_id(document.id);
        let mut failures = Vec::new();
        for (name, slot) in &document.fields {
            match slot {
                FieldSlot::Inline(value) => {
                    record.set(name.clone(), FieldValue::Primitive(value.clone()));
                }
                FieldSlot::Blob(blob_ref) => match self.load_blob_field(name, blob_ref) {
                    Ok(value) => record.set(name.clone(), value),
                    Err(error) => {
                        warn!(
                            collection = %self.collection,
                            id = %document.id.short_id(),
                            field = %name,
                            %error,
                            "field failed to reconstruct"
                        );
                        failures.push(FieldFailure {
                            field: name.clone(),
                            error,
                        });
                    }
                },
            }
        }
        LoadOutcome { record, failures }
    }

    fn load_blob_field(&self, name: &str, blob_ref: &BlobRef) -> ArchiveResult<FieldValue> {
        let payload = self.blobs.get_by_hash(&blob_ref.hash, name)?;
        // Decode with the codec that produced the bytes, as recorded with
        // the blob, never the registry's current type mapping.
        let codec = self.registry.resolve_id(&payload.codec)?;
        Ok(codec.decode(&payload.bytes)?)
    }

    fn encode_field(
        &self,
        name: &str,
        value: &FieldValue,
        codec: Arc<dyn Codec>,
    ) -> ArchiveResult<EncodedField> {
        let bytes = codec.encode(value)?;
        Ok(EncodedField {
            name: name.to_string(),
            hash: ContentHash::of(&bytes),
            bytes,
            codec: codec.id(),
        })
    }

    fn primitive_encoded_size(&self, value: &Primitive) -> ArchiveResult<u64> {
        bincode::serialized_size(value).map_err(|e| {
            ArchiveError::Codec(CodecError::Encode {
                codec: self.registry.default_codec().id(),
                reason: e.to_string(),
            })
        })
    }
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("collection", &self.collection)
            .field("registry", &self.registry)
            .finish()
    }
}
