use std::collections::BTreeSet;

use arka_types::{CodecId, ContentHash, DocumentId};

use crate::error::BlobResult;
use crate::record::{BlobPayload, PutReceipt};

/// Deduplicated, reference-counted storage for encoded byte payloads, keyed
/// by the content hash of their bytes (scoped per attribute name).
///
/// A binding table maps `(owner, attribute)` to the hash the owner currently
/// depends on; the record under each `(hash, attribute)` key carries the
/// owner set. The two views must never disagree after a completed operation.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under their content hash and bind `(owner, attribute)`
    /// to it.
    ///
    /// If the owner is already bound to the same hash, the call is a
    /// complete no-op: nothing is rewritten and neither owner sets nor
    /// timestamps change. Otherwise the owner joins the record for the new
    /// hash (created with `owners = {owner}` if the hash is new, otherwise
    /// joined without rewriting the stored bytes), and only then is any
    /// previously bound hash released (owner removed; record deleted when
    /// its owner set empties). The join-then-release order is mandatory: a
    /// displaced blob shared with a third owner must never be deleted while
    /// still the only bound reference.
    ///
    /// The add-or-create step must be a single atomic conditional update at
    /// the storage layer, never a read-then-write, because concurrent
    /// owners may race on the same hash.
    fn put(
        &self,
        owner: &DocumentId,
        attribute: &str,
        bytes: &[u8],
        codec: &CodecId,
    ) -> BlobResult<PutReceipt>;

    /// The payload currently bound for `(owner, attribute)`.
    fn get(&self, owner: &DocumentId, attribute: &str) -> BlobResult<BlobPayload>;

    /// The payload stored under `(hash, attribute)`, regardless of owner.
    ///
    /// This is the load path: the document supplies the hash from its blob
    /// reference. A missing hash is a typed error, never an empty payload.
    fn get_by_hash(&self, hash: &ContentHash, attribute: &str) -> BlobResult<BlobPayload>;

    /// Remove the owner's binding for `attribute` and shrink the bound
    /// record's owner set; delete the record if the set empties.
    ///
    /// Returns `false` when no binding existed (idempotent).
    fn release(&self, owner: &DocumentId, attribute: &str) -> BlobResult<bool>;

    /// Release every binding of `owner` (used when a whole document is
    /// dropped), applying the same emptiness-triggered deletion. Returns the
    /// number of bindings released.
    fn drop_owner(&self, owner: &DocumentId) -> BlobResult<usize>;

    /// The hash currently bound for `(owner, attribute)`, if any.
    fn bound_hash(&self, owner: &DocumentId, attribute: &str) -> BlobResult<Option<ContentHash>>;

    /// The owner set of the record under `(hash, attribute)`. Empty if no
    /// such record exists.
    fn owners(&self, hash: &ContentHash, attribute: &str) -> BlobResult<BTreeSet<DocumentId>>;
}
