//! Error types for proof re-encoding and assembly.

use ctxf_curve::CurveError;
use thiserror::Error;

/// Failures surfaced by the normalizers and the transaction assembler.
///
/// All of these are deterministic functions of input shape: the fix is to
/// regenerate the proof or correct the transaction upstream, never to retry
/// with the same input. Structural-validation findings are not errors; see
/// [`crate::validate::SchemaViolation`].
#[derive(Debug, Error)]
pub enum FormatError {
    /// A hardcoded required key is absent from a raw proof object.
    #[error("missing required proof field '{0}'")]
    MissingField(String),

    /// Malformed scalar hex, failed point decompression, or unparseable
    /// proof text.
    #[error("decode error: {0}")]
    Decode(String),

    /// Zero or multiple entries carry complementary fields, so the
    /// transaction has no unambiguous self-reference.
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),
}

impl From<CurveError> for FormatError {
    fn from(err: CurveError) -> Self {
        FormatError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Decode(err.to_string())
    }
}
