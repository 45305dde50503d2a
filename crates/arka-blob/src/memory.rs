use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use tracing::debug;

use arka_types::{CodecId, ContentHash, DocumentId};

use crate::error::{BlobError, BlobResult};
use crate::record::{BlobKey, BlobPayload, BlobRecord, PutReceipt};
use crate::traits::BlobStore;

/// Records and bindings behind one lock, so every mutation, including the
/// join-then-release swap inside `put`, is a single atomic step.
#[derive(Default)]
struct State {
    records: HashMap<BlobKey, BlobRecord>,
    bindings: HashMap<(DocumentId, String), ContentHash>,
}

impl State {
    /// Remove `owner` from the record under `(hash, attribute)`, deleting
    /// the record when its owner set empties.
    fn release_from_record(&mut self, owner: &DocumentId, hash: ContentHash, attribute: &str) {
        let key = BlobKey::new(hash, attribute);
        let emptied = match self.records.get_mut(&key) {
            Some(record) => {
                record.owners.remove(owner);
                record.owners.is_empty()
            }
            None => false,
        };
        if emptied {
            self.records.remove(&key);
            debug!(hash = %hash.short_hex(), attribute, "deleted unowned blob");
        }
    }
}

/// In-memory, `HashMap`-based blob store.
///
/// Intended for tests and embedding. The whole state sits behind one
/// `RwLock`; taking the write lock is this backend's atomic conditional
/// update, so concurrent `put`s on the same hash serialize here.
pub struct InMemoryBlobStore {
    state: RwLock<State>,
}

impl InMemoryBlobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Number of blob records currently stored.
    pub fn blob_count(&self) -> usize {
        self.state.read().expect("lock poisoned").records.len()
    }

    /// Returns `true` if no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").records.is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.state
            .read()
            .expect("lock poisoned")
            .records
            .values()
            .map(BlobRecord::size)
            .sum()
    }

    /// Sorted keys of all stored blobs.
    pub fn all_keys(&self) -> Vec<BlobKey> {
        let state = self.state.read().expect("lock poisoned");
        let mut keys: Vec<BlobKey> = state.records.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(
        &self,
        owner: &DocumentId,
        attribute: &str,
        bytes: &[u8],
        codec: &CodecId,
    ) -> BlobResult<PutReceipt> {
        let hash = ContentHash::of(bytes);
        let mut state = self.state.write().expect("lock poisoned");

        let binding = (*owner, attribute.to_string());
        let previous = state.bindings.get(&binding).copied();
        if previous == Some(hash) {
            // Identical resave is a complete no-op.
            return Ok(PutReceipt {
                hash,
                displaced: None,
                deduplicated: true,
                unchanged: true,
            });
        }

        // Join the new record first.
        let key = BlobKey::new(hash, attribute);
        let mut deduplicated = true;
        state
            .records
            .entry(key)
            .and_modify(|record| {
                record.owners.insert(*owner);
            })
            .or_insert_with(|| {
                deduplicated = false;
                BlobRecord::new(codec.clone(), bytes.to_vec(), *owner)
            });
        state.bindings.insert(binding, hash);
        debug!(
            owner = %owner.short_id(),
            attribute,
            hash = %hash.short_hex(),
            deduplicated,
            "bound blob"
        );

        // Only now release the displaced hash, so a shared blob is never
        // deleted while still the only bound reference.
        if let Some(old) = previous {
            state.release_from_record(owner, old, attribute);
        }

        Ok(PutReceipt {
            hash,
            displaced: previous,
            deduplicated,
            unchanged: false,
        })
    }

    fn get(&self, owner: &DocumentId, attribute: &str) -> BlobResult<BlobPayload> {
        let state = self.state.read().expect("lock poisoned");
        let hash = state
            .bindings
            .get(&(*owner, attribute.to_string()))
            .copied()
            .ok_or_else(|| BlobError::NotBound {
                owner: *owner,
                attribute: attribute.to_string(),
            })?;
        let record = state
            .records
            .get(&BlobKey::new(hash, attribute))
            .ok_or_else(|| BlobError::MissingBlob {
                hash,
                attribute: attribute.to_string(),
            })?;
        Ok(BlobPayload {
            bytes: record.bytes.clone(),
            codec: record.codec.clone(),
        })
    }

    fn get_by_hash(&self, hash: &ContentHash, attribute: &str) -> BlobResult<BlobPayload> {
        let state = self.state.read().expect("lock poisoned");
        let record = state
            .records
            .get(&BlobKey::new(*hash, attribute))
            .ok_or_else(|| BlobError::MissingBlob {
                hash: *hash,
                attribute: attribute.to_string(),
            })?;
        Ok(BlobPayload {
            bytes: record.bytes.clone(),
            codec: record.codec.clone(),
        })
    }

    fn release(&self, owner: &DocumentId, attribute: &str) -> BlobResult<bool> {
        let mut state = self.state.write().expect("lock poisoned");
        let Some(hash) = state.bindings.remove(&(*owner, attribute.to_string())) else {
            return Ok(false);
        };
        state.release_from_record(owner, hash, attribute);
        debug!(
            owner = %owner.short_id(),
            attribute,
            hash = %hash.short_hex(),
            "released blob binding"
        );
        Ok(true)
    }

    fn drop_owner(&self, owner: &DocumentId) -> BlobResult<usize> {
        let mut state = self.state.write().expect("lock poisoned");
        let bound: Vec<(String, ContentHash)> = state
            .bindings
            .iter()
            .filter(|((id, _), _)| id == owner)
            .map(|((_, attribute), hash)| (attribute.clone(), *hash))
            .collect();
        for (attribute, hash) in &bound {
            state.bindings.remove(&(*owner, attribute.clone()));
            state.release_from_record(owner, *hash, attribute);
        }
        debug!(owner = %owner.short_id(), released = bound.len(), "dropped owner");
        Ok(bound.len())
    }

    fn bound_hash(&self, owner: &DocumentId, attribute: &str) -> BlobResult<Option<ContentHash>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state
            .bindings
            .get(&(*owner, attribute.to_string()))
            .copied())
    }

    fn owners(&self, hash: &ContentHash, attribute: &str) -> BlobResult<BTreeSet<DocumentId>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state
            .records
            .get(&BlobKey::new(*hash, attribute))
            .map(|record| record.owners.clone())
            .unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &self.blob_count())
            .finish()
    }
}
