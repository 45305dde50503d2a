use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arka_types::{CodecId, ContentHash, DocumentId};

/// Storage key for one blob record.
///
/// Deduplication is scoped per attribute name: byte-identical payloads under
/// different attribute names are separate records with separate owner sets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobKey {
    pub hash: ContentHash,
    pub attribute: String,
}

impl BlobKey {
    pub fn new(hash: ContentHash, attribute: impl Into<String>) -> Self {
        Self {
            hash,
            attribute: attribute.into(),
        }
    }
}

/// One stored blob: immutable bytes, the codec that produced them, and the
/// set of document ids currently depending on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlobRecord {
    pub codec: CodecId,
    pub bytes: Vec<u8>,
    pub owners: BTreeSet<DocumentId>,
    pub created_at: DateTime<Utc>,
}

impl BlobRecord {
    /// Create a record owned by a single document.
    pub fn new(codec: CodecId, bytes: Vec<u8>, owner: DocumentId) -> Self {
        let mut owners = BTreeSet::new();
        owners.insert(owner);
        Self {
            codec,
            bytes,
            owners,
            created_at: Utc::now(),
        }
    }

    /// Size of the stored bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A blob's payload as returned to readers.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobPayload {
    pub bytes: Vec<u8>,
    pub codec: CodecId,
}

/// What a `put` actually did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutReceipt {
    /// Content hash of the stored bytes.
    pub hash: ContentHash,
    /// Hash the owner was previously bound to under this attribute, released
    /// by this put. `None` on first bind or identical resave.
    pub displaced: Option<ContentHash>,
    /// `true` if the bytes already existed and the owner joined an existing
    /// record instead of creating one.
    pub deduplicated: bool,
    /// `true` if the owner was already bound to these exact bytes and the
    /// put was a complete no-op.
    pub unchanged: bool,
}
