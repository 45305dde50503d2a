use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for an encode/decode pair.
///
/// Persisted with every blob so decoding resolves the codec that actually
/// produced the bytes, never the registry's current type mapping. Ids are
/// resolved through a registered lookup table only; a stored id is data,
/// never executable code.
///
/// Convention: `<format>/<version>`, e.g. `bincode/1`, `f64le/1`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CodecId(String);

impl CodecId {
    /// Create a codec id from its stable string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The stable string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodecId({})", self.0)
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CodecId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CodecId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
