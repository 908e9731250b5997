//! Raw and canonical proof representations.
//!
//! A raw proof object is an insertion-ordered mapping from field name to a
//! leaf of shape `{"scalar": ...}` or `{"point": ...}`, or an opaque
//! pass-through value. The shape is probed exactly once, at parse time, and
//! recorded in the [`ProofField`] tag; everything downstream dispatches on
//! the tag instead of re-inspecting JSON.

use ctxf_curve::AffinePoint;
use num_bigint::BigUint;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::FormatError;

/// One named entry of a raw proof object, tagged by its decoded kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ProofField {
    /// Hex-encoded scalar, still undecoded.
    Scalar(String),
    /// Compressed curve point, still undecoded.
    Point(String),
    /// Anything without a `scalar`/`point` sub-field; copied through as-is.
    Opaque(Value),
}

impl ProofField {
    fn from_named_value(name: &str, value: &Value) -> Result<Self, FormatError> {
        if let Value::Object(map) = value {
            if let Some(raw) = map.get("scalar") {
                let s = raw.as_str().ok_or_else(|| {
                    FormatError::Decode(format!("field '{name}': scalar is not a string"))
                })?;
                return Ok(ProofField::Scalar(s.to_owned()));
            }
            if let Some(raw) = map.get("point") {
                let s = raw.as_str().ok_or_else(|| {
                    FormatError::Decode(format!("field '{name}': point is not a string"))
                })?;
                return Ok(ProofField::Point(s.to_owned()));
            }
        }
        Ok(ProofField::Opaque(value.clone()))
    }

    /// Decode this field into its canonical value.
    pub fn decode(&self) -> Result<CanonicalValue, FormatError> {
        match self {
            ProofField::Scalar(hex) => Ok(CanonicalValue::Scalar(ctxf_curve::decode_scalar(hex)?)),
            ProofField::Point(hex) => Ok(CanonicalValue::Point(ctxf_curve::decompress(hex)?)),
            ProofField::Opaque(value) => Ok(CanonicalValue::Opaque(value.clone())),
        }
    }
}

/// An insertion-ordered raw proof object with per-field tags.
#[derive(Clone, Debug, Default)]
pub struct RawProof {
    fields: Vec<(String, ProofField)>,
}

impl RawProof {
    /// Parse a textual proof object, tagging every field.
    pub fn parse(raw_json: &str) -> Result<Self, FormatError> {
        let object: Map<String, Value> = serde_json::from_str(raw_json)?;
        Self::from_object(&object)
    }

    /// Build from an already-parsed JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, FormatError> {
        let mut fields = Vec::with_capacity(object.len());
        for (name, value) in object {
            fields.push((name.clone(), ProofField::from_named_value(name, value)?));
        }
        Ok(RawProof { fields })
    }

    pub fn get(&self, name: &str) -> Option<&ProofField> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Look up a hardcoded required key, failing with `MissingField`.
    pub fn require(&self, name: &str) -> Result<&ProofField, FormatError> {
        self.get(name)
            .ok_or_else(|| FormatError::MissingField(name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProofField)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A decoded proof value in the form downstream verifiers consume.
#[derive(Clone, Debug, PartialEq)]
pub enum CanonicalValue {
    /// Decoded scalar; serializes as a decimal string.
    Scalar(BigUint),
    /// Decompressed point; serializes as `["x", "y"]` decimal strings.
    Point(AffinePoint),
    /// Pass-through value, unchanged from the raw object.
    Opaque(Value),
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CanonicalValue::Scalar(value) => serializer.serialize_str(&value.to_str_radix(10)),
            CanonicalValue::Point(point) => point.serialize(serializer),
            CanonicalValue::Opaque(value) => value.serialize(serializer),
        }
    }
}

/// An insertion-ordered record of canonical field name to decoded value.
///
/// Field order is part of the re-encoding contract: records serialize their
/// fields in exactly the order the normalizer inserted them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanonicalProof {
    fields: Vec<(String, CanonicalValue)>,
}

impl CanonicalProof {
    pub fn insert(&mut self, name: impl Into<String>, value: CanonicalValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&CanonicalValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for CanonicalProof {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_inferred_once_at_parse_time() {
        let raw = RawProof::parse(
            r#"{
                "a": {"scalar": "0a"},
                "b": {"point": "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"},
                "c": 42,
                "d": {"nested": true}
            }"#,
        )
        .unwrap();

        assert!(matches!(raw.get("a"), Some(ProofField::Scalar(_))));
        assert!(matches!(raw.get("b"), Some(ProofField::Point(_))));
        assert!(matches!(raw.get("c"), Some(ProofField::Opaque(_))));
        assert!(matches!(raw.get("d"), Some(ProofField::Opaque(_))));
    }

    #[test]
    fn parse_preserves_insertion_order() {
        let raw = RawProof::parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let names: Vec<&str> = raw.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn parse_rejects_non_object_and_bad_leaves() {
        assert!(RawProof::parse("[1, 2, 3]").is_err());
        assert!(RawProof::parse(r#"{"a": {"scalar": 7}}"#).is_err());
    }

    #[test]
    fn require_reports_the_missing_key() {
        let raw = RawProof::parse(r#"{"present": {"scalar": "01"}}"#).unwrap();
        match raw.require("absent") {
            Err(FormatError::MissingField(name)) => assert_eq!(name, "absent"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn canonical_proof_serializes_in_insertion_order() {
        let mut proof = CanonicalProof::default();
        proof.insert("second_listed_first", CanonicalValue::Scalar(BigUint::from(7u8)));
        proof.insert("alpha", CanonicalValue::Opaque(Value::Bool(true)));

        let json = serde_json::to_string(&proof).unwrap();
        assert_eq!(json, r#"{"second_listed_first":"7","alpha":true}"#);
    }
}
