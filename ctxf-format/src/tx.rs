//! Transaction model and on-chain record assembly.
//!
//! A transaction is an ordered sequence of per-asset-group sequences of
//! entries, `tx[group][position]`. Exactly one entry across the whole
//! transaction carries complementary fields linking it to the distinguished
//! "complementary" asset; its equality proof and decompressed commitment and
//! token are broadcast into every emitted on-chain record.

use ctxf_curve::AffinePoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;
use crate::normalize::{normalize_equality_proof, normalize_generic_proof};
use crate::proof::CanonicalProof;

/// Compound asset-validity proof carried by the sender's entries: the
/// positivity half plus the equality proof that gets broadcast on-chain.
/// Wire form is a two-element array `[positivity, equality]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompoundAssetProof(pub Value, pub String);

impl CompoundAssetProof {
    pub fn positivity(&self) -> &Value {
        &self.0
    }

    /// The equality-proof text, still in its raw serialized form.
    pub fn equality(&self) -> &str {
        &self.1
    }
}

/// The sender's contribution for one asset, including the complementary
/// fields that link it to the distinguished asset in the transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SenderAssetEntry {
    pub cm: String,
    pub token: String,
    #[serde(rename = "P_C")]
    pub consistency: String,
    #[serde(rename = "P_A")]
    pub asset_proof: CompoundAssetProof,
    #[serde(rename = "cm_")]
    pub complementary_cm: String,
    #[serde(rename = "token_")]
    pub complementary_token: String,
    #[serde(rename = "P_C_")]
    pub complementary_consistency: String,
}

/// A non-sender participant's contribution for one asset: no complementary
/// fields, and the asset-validity proof is the positivity proof directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OtherAssetEntry {
    pub cm: String,
    pub token: String,
    #[serde(rename = "P_C")]
    pub consistency: String,
    #[serde(rename = "P_A")]
    pub asset_proof: Value,
}

/// One participant's contribution for one asset, discriminated by whether it
/// carries complementary fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetEntry {
    Sender(SenderAssetEntry),
    Other(OtherAssetEntry),
}

impl AssetEntry {
    pub fn cm(&self) -> &str {
        match self {
            AssetEntry::Sender(entry) => &entry.cm,
            AssetEntry::Other(entry) => &entry.cm,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            AssetEntry::Sender(entry) => &entry.token,
            AssetEntry::Other(entry) => &entry.token,
        }
    }
}

/// A multi-party, multi-asset transaction: `groups[group][position]`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction {
    pub groups: Vec<Vec<AssetEntry>>,
}

impl Transaction {
    /// Entries in `(group, position)` traversal order.
    pub fn entries(&self) -> impl Iterator<Item = &AssetEntry> {
        self.groups.iter().flatten()
    }
}

/// Per-asset record in the shape the on-chain verifier consumes.
#[derive(Clone, Debug, Serialize)]
pub struct AssetRecord {
    pub cm: AffinePoint,
    pub tk: AffinePoint,
    /// Decompressed commitment of the distinguished complementary entry;
    /// identical across all records of a transaction.
    pub compcm: AffinePoint,
    /// Decompressed token of the distinguished complementary entry.
    pub comptk: AffinePoint,
    /// The entry's positivity proof, passed through opaquely.
    pub ppositive: Value,
    pub pc: CanonicalProof,
    /// The broadcast equality proof; identical across all records.
    pub peq: CanonicalProof,
    #[serde(rename = "pc_")]
    pub complementary_pc: CanonicalProof,
}

/// Pass-1 capture: the single distinguished entry's broadcast data.
struct ComplementaryCapture<'a> {
    compcm: AffinePoint,
    comptk: AffinePoint,
    equality: &'a str,
    consistency: &'a str,
}

fn locate_complementary(tx: &Transaction) -> Result<ComplementaryCapture<'_>, FormatError> {
    let mut found: Option<ComplementaryCapture<'_>> = None;
    for entry in tx.entries() {
        if let AssetEntry::Sender(sender) = entry {
            if found.is_some() {
                return Err(FormatError::MalformedTransaction(
                    "more than one entry carries complementary fields".to_string(),
                ));
            }
            found = Some(ComplementaryCapture {
                compcm: ctxf_curve::decompress(&sender.complementary_cm)?,
                comptk: ctxf_curve::decompress(&sender.complementary_token)?,
                equality: sender.asset_proof.equality(),
                consistency: &sender.complementary_consistency,
            });
        }
    }
    found.ok_or_else(|| {
        FormatError::MalformedTransaction(
            "no entry carries complementary fields".to_string(),
        )
    })
}

/// Produce the on-chain verifier's record list, one record per entry in
/// `(group, position)` order.
///
/// Pass 1 locates the unique complementary entry and captures its broadcast
/// data; pass 2 emits the records. Callers are expected to have gated the
/// transaction through [`crate::validate::check_transaction_structure`]
/// first, which guarantees the uniqueness pass 1 enforces.
pub fn assemble_onchain_records(tx: &Transaction) -> Result<Vec<AssetRecord>, FormatError> {
    let capture = locate_complementary(tx)?;
    let peq = normalize_equality_proof(capture.equality)?;

    let mut records = Vec::new();
    for entry in tx.entries() {
        let (ppositive, pc, complementary_pc) = match entry {
            AssetEntry::Sender(sender) => (
                sender.asset_proof.positivity().clone(),
                normalize_generic_proof(&sender.consistency)?,
                normalize_generic_proof(&sender.complementary_consistency)?,
            ),
            AssetEntry::Other(other) => (
                other.asset_proof.clone(),
                normalize_generic_proof(&other.consistency)?,
                // Non-senders fall back to the distinguished entry's
                // complementary consistency proof.
                normalize_generic_proof(capture.consistency)?,
            ),
        };
        records.push(AssetRecord {
            cm: ctxf_curve::decompress(entry.cm())?,
            tk: ctxf_curve::decompress(entry.token())?,
            compcm: capture.compcm.clone(),
            comptk: capture.comptk.clone(),
            ppositive,
            pc,
            peq: peq.clone(),
            complementary_pc,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const G1: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G2: &str = "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

    fn sender_entry_value() -> Value {
        json!({
            "cm": G1,
            "token": G2,
            "P_C": r#"{"c": {"scalar": "0b"}}"#,
            "P_A": [json!([1, 0, 0, 0]), r#"{"pk": {"point": "x"}}"#],
            "cm_": G2,
            "token_": G1,
            "P_C_": r#"{"d": {"scalar": "0c"}}"#
        })
    }

    fn other_entry_value() -> Value {
        json!({
            "cm": G2,
            "token": G1,
            "P_C": r#"{"c": {"scalar": "0b"}}"#,
            "P_A": [0, 1, 1, 0]
        })
    }

    #[test]
    fn entries_with_complementary_fields_deserialize_as_sender() {
        let tx: Transaction =
            serde_json::from_value(json!([[sender_entry_value(), other_entry_value()]])).unwrap();
        let entries: Vec<&AssetEntry> = tx.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0], AssetEntry::Sender(_)));
        assert!(matches!(entries[1], AssetEntry::Other(_)));
    }

    #[test]
    fn locate_rejects_zero_complementary_entries() {
        let tx: Transaction =
            serde_json::from_value(json!([[other_entry_value(), other_entry_value()]])).unwrap();
        match assemble_onchain_records(&tx) {
            Err(FormatError::MalformedTransaction(msg)) => {
                assert!(msg.contains("no entry"), "{msg}");
            }
            other => panic!("expected MalformedTransaction, got {other:?}"),
        }
    }

    #[test]
    fn locate_rejects_duplicate_complementary_entries() {
        let tx: Transaction = serde_json::from_value(json!([
            [sender_entry_value()],
            [sender_entry_value()]
        ]))
        .unwrap();
        match assemble_onchain_records(&tx) {
            Err(FormatError::MalformedTransaction(msg)) => {
                assert!(msg.contains("more than one"), "{msg}");
            }
            other => panic!("expected MalformedTransaction, got {other:?}"),
        }
    }
}
