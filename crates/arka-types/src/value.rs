use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// A value the backing document can represent inline.
///
/// This is the fixed allow-list: integers, floats, booleans, text, ordered
/// sequences, mappings, and timestamps. Anything else is a [`ComplexValue`]
/// and goes through a codec into blob storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<Primitive>),
    Map(BTreeMap<String, Primitive>),
    Timestamp(DateTime<Utc>),
}

impl Primitive {
    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl From<i64> for Primitive {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Primitive {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Primitive {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Primitive {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for Primitive {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

/// A value that requires a codec and blob storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComplexValue {
    /// Dense numeric payload (weights, embeddings, measurement series).
    F64Array(Vec<f64>),
    /// Opaque byte payload.
    Bytes(Vec<u8>),
    /// Arbitrary structured data without a fixed schema.
    Json(serde_json::Value),
}

impl ComplexValue {
    /// The runtime kind, used for codec resolution on encode.
    pub fn kind(&self) -> ComplexKind {
        match self {
            Self::F64Array(_) => ComplexKind::F64Array,
            Self::Bytes(_) => ComplexKind::Bytes,
            Self::Json(_) => ComplexKind::Json,
        }
    }
}

/// Runtime kind tag for [`ComplexValue`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexKind {
    F64Array,
    Bytes,
    Json,
}

impl fmt::Display for ComplexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F64Array => write!(f, "f64-array"),
            Self::Bytes => write!(f, "bytes"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A named field's value: inline-representable or codec-backed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Primitive(Primitive),
    Complex(ComplexValue),
}

impl FieldValue {
    /// Returns `true` for values on the primitive allow-list.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Short name of the contained value kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(p) => p.kind_name(),
            Self::Complex(c) => match c.kind() {
                ComplexKind::F64Array => "f64-array",
                ComplexKind::Bytes => "bytes",
                ComplexKind::Json => "json",
            },
        }
    }
}

impl From<Primitive> for FieldValue {
    fn from(v: Primitive) -> Self {
        Self::Primitive(v)
    }
}

impl From<ComplexValue> for FieldValue {
    fn from(v: ComplexValue) -> Self {
        Self::Complex(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Primitive(Primitive::Int(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Primitive(Primitive::Float(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Primitive(Primitive::Bool(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Primitive(Primitive::Text(v.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Primitive(Primitive::Text(v))
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Primitive(Primitive::Timestamp(v))
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Complex(ComplexValue::F64Array(v))
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Complex(ComplexValue::Bytes(v))
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Complex(ComplexValue::Json(v))
    }
}

/// An in-memory object with named fields.
///
/// A record is ephemeral and owned by the caller. Its identity starts empty
/// (never saved); the archive engine binds it to a [`DocumentId`] on first
/// save. Fields live in a `BTreeMap`, so iteration order is the field-name
/// order and classification is stable across repeated calls.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    id: Option<DocumentId>,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record with no identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record already bound to a document id.
    pub fn with_id(id: DocumentId) -> Self {
        Self {
            id: Some(id),
            fields: BTreeMap::new(),
        }
    }

    /// The bound document id, if this record has been saved or loaded.
    pub fn id(&self) -> Option<DocumentId> {
        self.id
    }

    /// Bind this record to a document id.
    pub fn bind(&mut self, id: DocumentId) {
        self.id = Some(id);
    }

    /// Set a field value. Replaces any existing value under `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Remove a field, returning its value if present.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Iterate fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn set_and_get() {
        let mut record = Record::new();
        record.set("name", "sample");
        record.set("count", 3i64);
        record.set("weights", vec![0.5f64, 1.5]);

        assert_eq!(
            record.get("name"),
            Some(&FieldValue::Primitive(Primitive::Text("sample".into())))
        );
        assert_eq!(
            record.get("count"),
            Some(&FieldValue::Primitive(Primitive::Int(3)))
        );
        assert_eq!(
            record.get("weights"),
            Some(&FieldValue::Complex(ComplexValue::F64Array(vec![0.5, 1.5])))
        );
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn set_replaces_existing() {
        let mut record = Record::new();
        record.set("x", 1i64);
        record.set("x", 2i64);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("x"), Some(&FieldValue::from(2i64)));
    }

    #[test]
    fn remove_field() {
        let mut record = Record::new();
        record.set("x", true);
        assert!(record.remove("x").is_some());
        assert!(record.remove("x").is_none());
        assert!(record.is_empty());
    }

    #[test]
    fn fields_iterate_in_name_order() {
        let mut record = Record::new();
        record.set("zebra", 1i64);
        record.set("alpha", 2i64);
        record.set("middle", 3i64);

        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn new_record_has_no_identity() {
        let record = Record::new();
        assert!(record.id().is_none());

        let mut bound = Record::new();
        let id = DocumentId::new();
        bound.bind(id);
        assert_eq!(bound.id(), Some(id));
    }

    #[test]
    fn complex_kind_mapping() {
        assert_eq!(
            ComplexValue::F64Array(vec![]).kind(),
            ComplexKind::F64Array
        );
        assert_eq!(ComplexValue::Bytes(vec![]).kind(), ComplexKind::Bytes);
        assert_eq!(
            ComplexValue::Json(serde_json::json!({})).kind(),
            ComplexKind::Json
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(FieldValue::from(1i64).kind_name(), "int");
        assert_eq!(FieldValue::from("x").kind_name(), "text");
        assert_eq!(FieldValue::from(vec![1.0f64]).kind_name(), "f64-array");
        assert_eq!(FieldValue::from(vec![1u8]).kind_name(), "bytes");
    }

    #[test]
    fn vec_u8_and_vec_f64_classify_as_complex() {
        assert!(!FieldValue::from(vec![0u8, 1]).is_primitive());
        assert!(!FieldValue::from(vec![0.1f64]).is_primitive());
        assert!(FieldValue::from(7i64).is_primitive());
    }

    #[test]
    fn nested_primitive_containers() {
        let mut map = BTreeMap::new();
        map.insert("inner".to_string(), Primitive::List(vec![Primitive::Int(1)]));
        let value = FieldValue::Primitive(Primitive::Map(map));
        assert!(value.is_primitive());
        assert_eq!(value.kind_name(), "map");
    }

    #[test]
    fn field_value_bincode_roundtrip() {
        // JSON values are excluded: they deserialize through
        // `deserialize_any`, which bincode does not support.
        let values = vec![
            FieldValue::from(42i64),
            FieldValue::from(2.5f64),
            FieldValue::from(true),
            FieldValue::from("text"),
            FieldValue::from(vec![1.0f64, 2.0]),
            FieldValue::from(vec![0u8, 255]),
            FieldValue::Primitive(Primitive::Timestamp(Utc::now())),
        ];
        for value in values {
            let bytes = bincode::serialize(&value).unwrap();
            let back: FieldValue = bincode::deserialize(&bytes).unwrap();
            assert_eq!(value, back);
        }
    }

    #[test]
    fn field_value_json_roundtrip() {
        let value = FieldValue::from(serde_json::json!({"k": [1, 2], "s": "x"}));
        let text = serde_json::to_string(&value).unwrap();
        let back: FieldValue = serde_json::from_str(&text).unwrap();
        assert_eq!(value, back);
    }

    proptest! {
        #[test]
        fn primitive_bincode_is_deterministic(n in any::<i64>(), s in ".{0,64}") {
            let value = FieldValue::Primitive(Primitive::List(vec![
                Primitive::Int(n),
                Primitive::Text(s),
            ]));
            let a = bincode::serialize(&value).unwrap();
            let b = bincode::serialize(&value).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
