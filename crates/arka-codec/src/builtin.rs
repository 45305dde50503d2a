use arka_types::{CodecId, ComplexValue, FieldValue};

use crate::error::{CodecError, CodecResult};
use crate::traits::Codec;

/// Stable id of [`BincodeCodec`].
pub const BINCODE_CODEC_ID: &str = "bincode/1";
/// Stable id of [`F64ArrayCodec`].
pub const F64_ARRAY_CODEC_ID: &str = "f64le/1";
/// Stable id of [`JsonCodec`].
pub const JSON_CODEC_ID: &str = "json/1";

// ---------------------------------------------------------------------------
// BincodeCodec
// ---------------------------------------------------------------------------

/// The default generic codec: bincode over the whole [`FieldValue`] enum.
///
/// Handles every value kind except schemaless JSON, including primitives
/// routed to blob storage for being oversized. More specific codecs win at
/// registry resolution; this one is the fallback.
///
/// JSON values are rejected at encode: they deserialize through
/// `deserialize_any`, which bincode does not support, so accepting them
/// would break the round-trip law at decode time. They belong to
/// [`JsonCodec`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn id(&self) -> CodecId {
        CodecId::new(BINCODE_CODEC_ID)
    }

    fn encode(&self, value: &FieldValue) -> CodecResult<Vec<u8>> {
        if matches!(value, FieldValue::Complex(ComplexValue::Json(_))) {
            return Err(CodecError::UnsupportedKind {
                codec: self.id(),
                kind: value.kind_name(),
            });
        }
        bincode::serialize(value).map_err(|e| CodecError::Encode {
            codec: self.id(),
            reason: e.to_string(),
        })
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<FieldValue> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode {
            codec: self.id(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// F64ArrayCodec
// ---------------------------------------------------------------------------

/// Fixed-layout codec for dense `f64` arrays.
///
/// Layout: an 8-byte little-endian element count, then each element as
/// 8 little-endian bytes. The layout is the contract behind the `f64le/1`
/// id; change it only under a new id (`f64le/2`).
#[derive(Debug, Default, Clone, Copy)]
pub struct F64ArrayCodec;

impl Codec for F64ArrayCodec {
    fn id(&self) -> CodecId {
        CodecId::new(F64_ARRAY_CODEC_ID)
    }

    fn encode(&self, value: &FieldValue) -> CodecResult<Vec<u8>> {
        let values = match value {
            FieldValue::Complex(ComplexValue::F64Array(values)) => values,
            other => {
                return Err(CodecError::UnsupportedKind {
                    codec: self.id(),
                    kind: other.kind_name(),
                })
            }
        };
        let mut buf = Vec::with_capacity(8 + values.len() * 8);
        buf.extend_from_slice(&(values.len() as u64).to_le_bytes());
        for v in values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<FieldValue> {
        if bytes.len() < 8 {
            return Err(CodecError::Decode {
                codec: self.id(),
                reason: format!("truncated header: {} bytes", bytes.len()),
            });
        }
        let len = u64::from_le_bytes(bytes[..8].try_into().expect("checked length")) as usize;
        let body = &bytes[8..];
        if body.len() != len * 8 {
            return Err(CodecError::Decode {
                codec: self.id(),
                reason: format!("expected {} payload bytes, got {}", len * 8, body.len()),
            });
        }
        let values = body
            .chunks_exact(8)
            .map(|chunk| f64::from_le_bytes(chunk.try_into().expect("chunked by 8")))
            .collect();
        Ok(FieldValue::Complex(ComplexValue::F64Array(values)))
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// Codec for schemaless structured values.
///
/// Encodes the inner `serde_json::Value` as canonical JSON text (object keys
/// sorted by `serde_json`'s default map), which keeps equal logical values
/// byte-identical.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn id(&self) -> CodecId {
        CodecId::new(JSON_CODEC_ID)
    }

    fn encode(&self, value: &FieldValue) -> CodecResult<Vec<u8>> {
        let json = match value {
            FieldValue::Complex(ComplexValue::Json(json)) => json,
            other => {
                return Err(CodecError::UnsupportedKind {
                    codec: self.id(),
                    kind: other.kind_name(),
                })
            }
        };
        serde_json::to_vec(json).map_err(|e| CodecError::Encode {
            codec: self.id(),
            reason: e.to_string(),
        })
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<FieldValue> {
        let json = serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
            codec: self.id(),
            reason: e.to_string(),
        })?;
        Ok(FieldValue::Complex(ComplexValue::Json(json)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arka_types::Primitive;

    #[test]
    fn bincode_roundtrips_every_kind_but_json() {
        let codec = BincodeCodec;
        let values = vec![
            FieldValue::from(42i64),
            FieldValue::from("text"),
            FieldValue::from(vec![1.5f64, -2.5]),
            FieldValue::from(vec![0u8, 1, 255]),
            FieldValue::Primitive(Primitive::List(vec![
                Primitive::Int(1),
                Primitive::Text("two".into()),
            ])),
        ];
        for value in values {
            let bytes = codec.encode(&value).unwrap();
            let back = codec.decode(&bytes).unwrap();
            assert_eq!(value, back);
        }
    }

    #[test]
    fn bincode_rejects_json_values() {
        let codec = BincodeCodec;
        let err = codec
            .encode(&FieldValue::from(serde_json::json!({"k": 1})))
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedKind { kind: "json", .. }
        ));
    }

    #[test]
    fn bincode_is_deterministic() {
        let codec = BincodeCodec;
        let value = FieldValue::Primitive(Primitive::Map(
            [
                ("b".to_string(), Primitive::Int(2)),
                ("a".to_string(), Primitive::Int(1)),
            ]
            .into_iter()
            .collect(),
        ));
        let first = codec.encode(&value).unwrap();
        let second = codec.encode(&value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn f64_array_roundtrip() {
        let codec = F64ArrayCodec;
        let value = FieldValue::from(vec![0.0f64, -1.5, f64::MAX, 1e-300]);
        let bytes = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn f64_array_layout_is_stable() {
        let codec = F64ArrayCodec;
        let bytes = codec.encode(&FieldValue::from(vec![1.0f64])).unwrap();
        let mut expected = vec![1u8, 0, 0, 0, 0, 0, 0, 0];
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn f64_array_empty() {
        let codec = F64ArrayCodec;
        let value = FieldValue::from(Vec::<f64>::new());
        let bytes = codec.encode(&value).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn f64_array_rejects_other_kinds() {
        let codec = F64ArrayCodec;
        let err = codec.encode(&FieldValue::from("not an array")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedKind { kind: "text", .. }
        ));
    }

    #[test]
    fn f64_array_rejects_truncated_payload() {
        let codec = F64ArrayCodec;
        assert!(matches!(
            codec.decode(&[0u8; 4]).unwrap_err(),
            CodecError::Decode { .. }
        ));

        // Header claims two elements, body holds one.
        let mut bytes = 2u64.to_le_bytes().to_vec();
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        assert!(matches!(
            codec.decode(&bytes).unwrap_err(),
            CodecError::Decode { .. }
        ));
    }

    #[test]
    fn json_roundtrip() {
        let codec = JsonCodec;
        let value = FieldValue::from(serde_json::json!({
            "name": "sample",
            "tags": ["a", "b"],
            "depth": {"inner": 2}
        }));
        let bytes = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn json_is_deterministic_across_key_order() {
        let codec = JsonCodec;
        let a: serde_json::Value = serde_json::from_str(r#"{"x": 1, "a": 2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"a": 2, "x": 1}"#).unwrap();
        let bytes_a = codec.encode(&FieldValue::from(a)).unwrap();
        let bytes_b = codec.encode(&FieldValue::from(b)).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn json_rejects_other_kinds() {
        let codec = JsonCodec;
        let err = codec.encode(&FieldValue::from(vec![1.0f64])).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedKind { .. }));
    }

    #[test]
    fn json_rejects_garbage_bytes() {
        let codec = JsonCodec;
        assert!(matches!(
            codec.decode(b"{not json").unwrap_err(),
            CodecError::Decode { .. }
        ));
    }

    #[test]
    fn codec_ids_are_stable() {
        assert_eq!(BincodeCodec.id().as_str(), "bincode/1");
        assert_eq!(F64ArrayCodec.id().as_str(), "f64le/1");
        assert_eq!(JsonCodec.id().as_str(), "json/1");
    }
}
