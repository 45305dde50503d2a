use std::collections::BTreeSet;

use arka_types::{ComplexValue, FieldValue, Primitive, Record};

/// A record's fields split by storage strategy: primitives go inline into
/// the document, complex values go through a codec into blob storage.
///
/// Both sequences are disjoint and ordered by field name.
#[derive(Debug, Default, PartialEq)]
pub struct Classified<'a> {
    pub primitives: Vec<(&'a str, &'a Primitive)>,
    pub complex: Vec<(&'a str, &'a ComplexValue)>,
}

/// Split a record's non-excluded fields into primitive and complex
/// sequences.
///
/// Pure: no side effects, and stable. Repeated calls on an unchanged
/// record produce identical output, because records iterate their fields in
/// name order.
pub fn classify<'a>(record: &'a Record, excludes: &BTreeSet<String>) -> Classified<'a> {
    let mut classified = Classified::default();
    for (name, value) in record.fields() {
        if excludes.contains(name) {
            continue;
        }
        match value {
            FieldValue::Primitive(p) => classified.primitives.push((name, p)),
            FieldValue::Complex(c) => classified.complex.push((name, c)),
        }
    }
    classified
}
