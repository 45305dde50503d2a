use std::collections::HashMap;
use std::sync::Arc;

use arka_types::{CodecId, ComplexKind};
use tracing::debug;

use crate::builtin::{BincodeCodec, F64ArrayCodec, JsonCodec};
use crate::error::{CodecError, CodecResult};
use crate::traits::Codec;

/// Maps value kinds to codecs for encoding, and stored ids to codecs for
/// decoding.
///
/// Encode resolution goes kind → codec, falling back to the default generic
/// codec when no kind-specific codec is registered. Decode resolution goes
/// only through the id table: the id stored with a blob is looked up here,
/// never evaluated, and never re-derived from the value's kind. Keeping a
/// codec in the id table (without any kind mapping) is how old archives stay
/// decodable after the encode-side mapping moves on.
pub struct CodecRegistry {
    by_kind: HashMap<ComplexKind, Arc<dyn Codec>>,
    by_id: HashMap<CodecId, Arc<dyn Codec>>,
    default: Arc<dyn Codec>,
}

impl CodecRegistry {
    /// The standard registry: bincode as the generic fallback, the f64 array
    /// codec for dense numeric payloads, JSON for schemaless values.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty(Arc::new(BincodeCodec));
        registry.register(ComplexKind::F64Array, Arc::new(F64ArrayCodec));
        registry.register(ComplexKind::Json, Arc::new(JsonCodec));
        registry
    }

    /// A registry with no kind mappings and the given default codec.
    pub fn empty(default: Arc<dyn Codec>) -> Self {
        let mut by_id: HashMap<CodecId, Arc<dyn Codec>> = HashMap::new();
        by_id.insert(default.id(), Arc::clone(&default));
        Self {
            by_kind: HashMap::new(),
            by_id,
            default,
        }
    }

    /// Register a codec for a value kind. The codec also becomes resolvable
    /// by id. A later registration for the same kind wins.
    pub fn register(&mut self, kind: ComplexKind, codec: Arc<dyn Codec>) {
        debug!(codec = %codec.id(), %kind, "registering codec for kind");
        self.by_id.insert(codec.id(), Arc::clone(&codec));
        self.by_kind.insert(kind, codec);
    }

    /// Register a codec for decode-only resolution (no kind mapping).
    ///
    /// Use this to keep blobs written by a retired codec readable.
    pub fn register_codec(&mut self, codec: Arc<dyn Codec>) {
        debug!(codec = %codec.id(), "registering decode-only codec");
        self.by_id.insert(codec.id(), codec);
    }

    /// The most specific codec for a value kind, or the default.
    pub fn resolve(&self, kind: ComplexKind) -> Arc<dyn Codec> {
        self.by_kind
            .get(&kind)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::clone(&self.default))
    }

    /// The codec registered under a stored id.
    ///
    /// This is the decode path. An unknown id is a typed error; the caller
    /// surfaces it per attribute rather than aborting a whole load.
    pub fn resolve_id(&self, id: &CodecId) -> CodecResult<Arc<dyn Codec>> {
        self.by_id
            .get(id)
            .map(Arc::clone)
            .ok_or_else(|| CodecError::UnknownCodec(id.clone()))
    }

    /// The default generic codec.
    pub fn default_codec(&self) -> Arc<dyn Codec> {
        Arc::clone(&self.default)
    }

    /// Ids of every registered codec, sorted.
    pub fn codec_ids(&self) -> Vec<CodecId> {
        let mut ids: Vec<CodecId> = self.by_id.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("default", &self.default.id())
            .field("kinds", &self.by_kind.len())
            .field("ids", &self.by_id.len())
            .finish()
    }
}
