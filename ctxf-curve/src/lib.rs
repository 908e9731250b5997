//! secp256k1 point decompression and scalar codecs.
//!
//! Raw proof objects carry curve points in SEC1 compressed form (one flag
//! byte plus the 32-byte x coordinate, hex encoded) and scalars as 64-digit
//! hex strings. The on-chain verifier wants affine `(x, y)` coordinate pairs
//! as big integers. This crate is the adapter between the two: it owns the
//! hex handling and the `k256` decompression call, and nothing else — no
//! group arithmetic, no proof logic.

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::EncodedPoint;
use num_bigint::BigUint;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Byte length of a SEC1 compressed secp256k1 point (flag byte + x).
pub const COMPRESSED_POINT_BYTES: usize = 33;

/// Canonical hex length of an encoded scalar (32 bytes, no prefix).
pub const SCALAR_HEX_LEN: usize = 64;

/// Decoding failures at the curve boundary.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Compressed point has the wrong byte length.
    #[error("invalid compressed point length: expected {expected} bytes, got {found}")]
    InvalidLength { expected: usize, found: usize },

    /// Encoding does not name a point on the curve (bad flag byte, x out of
    /// range, or no square root for the implied y).
    #[error("encoding is not a point on the curve")]
    NotOnCurve,
}

/// An affine secp256k1 point as a pair of big-integer coordinates.
///
/// Serializes as a two-element JSON array of decimal strings, `["x", "y"]`;
/// 256-bit coordinates do not fit losslessly in JSON numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: BigUint,
    pub y: BigUint,
}

impl Serialize for AffinePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.x.to_str_radix(10))?;
        seq.serialize_element(&self.y.to_str_radix(10))?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for AffinePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PointVisitor;

        impl<'de> Visitor<'de> for PointVisitor {
            type Value = AffinePoint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a two-element array of decimal coordinate strings")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let x: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let y: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let x = BigUint::parse_bytes(x.as_bytes(), 10)
                    .ok_or_else(|| de::Error::custom("x is not a decimal integer"))?;
                let y = BigUint::parse_bytes(y.as_bytes(), 10)
                    .ok_or_else(|| de::Error::custom("y is not a decimal integer"))?;
                Ok(AffinePoint { x, y })
            }
        }

        deserializer.deserialize_seq(PointVisitor)
    }
}

fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decompress a SEC1 compressed point into its affine `(x, y)` pair.
///
/// Accepts the 66-hex-digit compressed encoding with or without a `0x`
/// prefix. Anything that is not exactly one flag byte plus 32 coordinate
/// bytes, or that names no point on the curve, is rejected.
pub fn decompress(compressed_hex: &str) -> Result<AffinePoint, CurveError> {
    let digits = strip_hex_prefix(compressed_hex);
    let bytes = hex::decode(digits).map_err(|e| CurveError::InvalidHex(e.to_string()))?;
    if bytes.len() != COMPRESSED_POINT_BYTES {
        return Err(CurveError::InvalidLength {
            expected: COMPRESSED_POINT_BYTES,
            found: bytes.len(),
        });
    }

    let encoded = EncodedPoint::from_bytes(&bytes).map_err(|_| CurveError::NotOnCurve)?;
    let point = Option::<k256::AffinePoint>::from(k256::AffinePoint::from_encoded_point(&encoded))
        .ok_or(CurveError::NotOnCurve)?;

    let uncompressed = point.to_encoded_point(false);
    let x = uncompressed.x().ok_or(CurveError::NotOnCurve)?;
    let y = uncompressed.y().ok_or(CurveError::NotOnCurve)?;
    Ok(AffinePoint {
        x: BigUint::from_bytes_be(x),
        y: BigUint::from_bytes_be(y),
    })
}

/// Parse a raw scalar hex string into a big integer.
///
/// Raw proofs carry scalars without a `0x` prefix; one is tolerated and
/// stripped if present. The digits must be non-empty valid hex.
pub fn decode_scalar(scalar_hex: &str) -> Result<BigUint, CurveError> {
    let digits = strip_hex_prefix(scalar_hex);
    if digits.is_empty() {
        return Err(CurveError::InvalidHex("empty scalar".to_string()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| CurveError::InvalidHex(format!("malformed scalar '{digits}'")))
}

/// Encode a scalar in its canonical wire form: lowercase hex, zero-padded to
/// 64 digits, no prefix. Inverse of [`decode_scalar`] for in-range scalars.
pub fn encode_scalar(value: &BigUint) -> String {
    format!("{value:064x}")
}
