//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// The verification path never surfaces these to its callers; they are
/// mapped to the result taxonomy at the point of use. Signing surfaces
/// them, since a bad caller-supplied key is a caller error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Public key hex or SEC1 point is malformed
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Private key hex or scalar is malformed
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signature components are malformed (bad hex/DER/decimal string)
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Signature components do not fit the curve's field size
    #[error("Signature component out of range for curve {curve}")]
    ComponentOutOfRange {
        /// Curve name, e.g. `secp192r1`
        curve: &'static str,
    },

    /// Digest has the wrong length for the curve
    #[error("Invalid digest length: expected {expected}, got {actual}")]
    InvalidDigestLength {
        /// Expected digest length in bytes
        expected: usize,
        /// Actual digest length in bytes
        actual: usize,
    },

    /// Curve library rejected the signing operation
    #[error("Signing failed")]
    SigningFailed,
}
