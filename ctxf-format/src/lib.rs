//! ctxf-format
//!
//! Canonical re-encoding and structural validation of confidential
//! transaction proof bundles.
//!
//! Off-chain provers emit heterogeneous proof objects — mappings of named
//! fields that are hex scalars, compressed curve points, or nested
//! sub-proofs. The two downstream verifiers (an on-chain contract and a
//! native verifier) expect a normalized, order-preserving, fixed-width
//! representation of the same data. This crate owns that bridge:
//!
//! - [`normalize`] — one encoder per proof kind, turning raw proof objects
//!   into canonical records of decoded scalars and affine points.
//! - [`tx`] — the transaction model and the two-pass assembly of the
//!   on-chain verifier's per-asset record list.
//! - [`validate`] — the schema-driven structural gate run over the wire
//!   JSON before anything is deserialized or assembled.
//! - [`foursquare`] — sum-of-four-squares decomposition for the range-proof
//!   encoding of committed quantities.
//!
//! Everything here is a synchronous, pure transformation over in-memory
//! structures; curve arithmetic is confined to the `ctxf-curve` adapter and
//! proof generation/verification is out of scope entirely.

pub mod error;
pub mod foursquare;
pub mod normalize;
pub mod proof;
pub mod tx;
pub mod validate;

pub use ctxf_curve::{decompress, AffinePoint, CurveError};
pub use error::FormatError;
pub use foursquare::four_squares;
pub use normalize::{
    normalize_consistency_proof, normalize_equality_proof, normalize_generic_proof,
    normalize_range_proof,
};
pub use proof::{CanonicalProof, CanonicalValue, ProofField, RawProof};
pub use tx::{
    assemble_onchain_records, AssetEntry, AssetRecord, CompoundAssetProof, OtherAssetEntry,
    SenderAssetEntry, Transaction,
};
pub use validate::{
    check_entry, check_transaction_structure, FieldKind, FieldRule, SchemaViolation,
    COMMITMENT_HEX_LEN,
};
