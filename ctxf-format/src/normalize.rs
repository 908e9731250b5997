//! Canonical re-encoding of raw proof objects.
//!
//! One encoder per proof kind. The bespoke encoders carry fixed, exhaustive
//! rename tables; a missing raw key is always `MissingField`, never silently
//! skipped. The generic encoder is the fallback for proof kinds without a
//! table and keeps the input's key set unchanged.

use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::proof::{CanonicalProof, CanonicalValue, ProofField, RawProof};

/// Point fields of the range-proof-positive-commitment object; decompressed
/// and carried over under their original names.
const RANGE_PROOF_POINTS: &[(&str, &str)] = &[
    ("cm1", "cm1"),
    ("cm2", "cm2"),
    ("cm3", "cm3"),
    ("chalRspDg", "chalRspDg"),
    ("chalRspD1h", "chalRspD1h"),
    ("challengecm2", "challengecm2"),
    ("chalRspDcm2", "chalRspDcm2"),
    ("chalRspD2h", "chalRspD2h"),
    ("challengecm3", "challengecm3"),
];

/// Scalar fields of the range proof, renamed to their on-chain abbreviations.
const RANGE_PROOF_SCALARS: &[(&str, &str)] = &[
    ("challenge", "challenge"),
    ("challenge_response_D", "chalRspD"),
    ("challenge_response_D1", "chalRspD1"),
    ("challenge_response_D2", "chalRspD2"),
];

const EQUALITY_PROOF_POINTS: &[(&str, &str)] = &[
    ("pk", "pk"),
    ("pk_t_rand_commitment", "pktrand"),
    ("chalrsph2r", "chalrsph2r"),
    ("challengepk", "challengepk"),
];

const EQUALITY_PROOF_SCALARS: &[(&str, &str)] = &[("challenge_response", "chalrsp")];

fn require_point(raw: &RawProof, name: &str) -> Result<CanonicalValue, FormatError> {
    match raw.require(name)? {
        ProofField::Point(hex) => Ok(CanonicalValue::Point(ctxf_curve::decompress(hex)?)),
        _ => Err(FormatError::Decode(format!("field '{name}' is not a point"))),
    }
}

fn require_scalar(raw: &RawProof, name: &str) -> Result<CanonicalValue, FormatError> {
    match raw.require(name)? {
        ProofField::Scalar(hex) => Ok(CanonicalValue::Scalar(ctxf_curve::decode_scalar(hex)?)),
        _ => Err(FormatError::Decode(format!("field '{name}' is not a scalar"))),
    }
}

fn apply_rename_tables(
    raw: &RawProof,
    points: &[(&str, &str)],
    scalars: &[(&str, &str)],
) -> Result<CanonicalProof, FormatError> {
    let mut out = CanonicalProof::default();
    for (raw_name, canonical_name) in points {
        out.insert(*canonical_name, require_point(raw, raw_name)?);
    }
    for (raw_name, canonical_name) in scalars {
        out.insert(*canonical_name, require_scalar(raw, raw_name)?);
    }
    Ok(out)
}

/// Normalize a range-proof-positive-commitment object: nine decompressed
/// points under their original names, four scalars under abbreviated names.
pub fn normalize_range_proof(raw: &RawProof) -> Result<CanonicalProof, FormatError> {
    apply_rename_tables(raw, RANGE_PROOF_POINTS, RANGE_PROOF_SCALARS)
}

/// Normalize an equality proof: four decompressed points and one scalar,
/// renamed per the fixed table.
pub fn normalize_equality_proof(raw_json: &str) -> Result<CanonicalProof, FormatError> {
    let raw = RawProof::parse(raw_json)?;
    apply_rename_tables(&raw, EQUALITY_PROOF_POINTS, EQUALITY_PROOF_SCALARS)
}

/// Normalize an arbitrary proof object by per-field tag dispatch: scalars
/// decode to integers, points decompress to pairs, everything else passes
/// through. The key set is the input's, unrenamed.
pub fn normalize_generic_proof(raw_json: &str) -> Result<CanonicalProof, FormatError> {
    let raw = RawProof::parse(raw_json)?;
    let mut out = CanonicalProof::default();
    for (name, field) in raw.iter() {
        out.insert(name, field.decode()?);
    }
    Ok(out)
}

/// Augment a consistency proof with decompressed `cm`, `tk`, and `pubkey`
/// fields derived from the three compressed inputs, then re-serialize.
///
/// This is the one normalizer that round-trips through text instead of
/// returning a decoded record: its downstream consumers chain on the textual
/// form, so the asymmetry is intentional.
pub fn normalize_consistency_proof(
    raw_json: &str,
    commitment: &str,
    token: &str,
    pubkey: &str,
) -> Result<String, FormatError> {
    let mut object: Map<String, Value> = serde_json::from_str(raw_json)?;
    object.insert("cm".to_owned(), decompressed_point_value(commitment)?);
    object.insert("tk".to_owned(), decompressed_point_value(token)?);
    object.insert("pubkey".to_owned(), decompressed_point_value(pubkey)?);
    serde_json::to_string(&object).map_err(Into::into)
}

fn decompressed_point_value(compressed_hex: &str) -> Result<Value, FormatError> {
    let point = ctxf_curve::decompress(compressed_hex)?;
    serde_json::to_value(&point).map_err(Into::into)
}
