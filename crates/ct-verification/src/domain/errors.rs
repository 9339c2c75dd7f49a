//! # Domain Errors
//!
//! Verification never errors, it always returns a typed
//! `CryptoResult`. Signing can error: a bad caller-supplied private key
//! or an unencodable record is a caller problem, not a verification
//! outcome.

use crate::domain::encoder::EncodeError;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors producing a signature for a measurement value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    /// The measurement's signature algorithm names no known format.
    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The record could not be encoded into its canonical buffer.
    #[error("Record could not be encoded: {0}")]
    Encode(#[from] EncodeError),

    /// Key or curve failure from the signature engine.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
