use std::collections::BTreeSet;

/// Encoded size above which a primitive is offloaded to the blob store
/// instead of stored inline. Matches the classic 16 MiB document cap of
/// document-oriented backends.
pub const DEFAULT_OFFLOAD_THRESHOLD: usize = 16 * 1024 * 1024;

/// Configuration for one [`crate::Archive`].
#[derive(Clone, Debug)]
pub struct ArchiveConfig {
    /// Field names never archived (internal bookkeeping fields).
    pub excludes: BTreeSet<String>,
    /// Encoded size in bytes above which a primitive value is offloaded to
    /// the blob store with the default codec.
    pub offload_threshold: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            excludes: BTreeSet::new(),
            offload_threshold: DEFAULT_OFFLOAD_THRESHOLD,
        }
    }
}

impl ArchiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field name to the exclusion set.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excludes.insert(name.into());
        self
    }

    /// Override the offload threshold.
    pub fn offload_threshold(mut self, bytes: usize) -> Self {
        self.offload_threshold = bytes;
        self
    }
}
