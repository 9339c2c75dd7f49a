//! # ECDSA Signatures (NIST P-192 / P-256)
//!
//! Sign and verify meter record digests on the two curves the supported
//! meter firmwares use.
//!
//! ## Security Notes
//!
//! - **Prehash only**: the message is always an externally computed
//!   SHA-256 digest truncated to the curve's field size. The engine
//!   refuses digests of any other length.
//! - **Fail closed**: `verify` maps every parse error and curve-library
//!   failure to `false`; it never panics or propagates.
//! - **RFC 6979**: signing uses deterministic nonces via the RustCrypto
//!   `ecdsa` stack.
//! - Private key material is zeroized after signing.

use crate::CryptoError;
use p192::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p192::ecdsa::{Signature as P192Signature, VerifyingKey as P192VerifyingKey};
use p192::elliptic_curve::ops::{Invert, Reduce};
use p192::elliptic_curve::point::AffineCoordinates;
use p192::elliptic_curve::{Field, NonZeroScalar, PrimeField, SecretKey};
use p192::{NistP192, ProjectivePoint as P192ProjectivePoint};
use p256::ecdsa::{
    Signature as P256Signature, SigningKey as P256SigningKey, VerifyingKey as P256VerifyingKey,
};
use primitive_types::U256;
use sha2::Sha256;
use shared_types::{EccSignature, SignatureFormat};
use zeroize::Zeroize;

// The p192 crate exposes no root aliases for these; take them from the
// generic elliptic-curve layer instead.
type P192SecretKey = SecretKey<NistP192>;
type P192NonZeroScalar = NonZeroScalar<NistP192>;

/// A named elliptic curve supported by the signature engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// secp192r1. 24-byte field; signatures use 24 digest bytes.
    NistP192,
    /// secp256r1. 32-byte field; signatures use the full SHA-256 digest.
    NistP256,
}

impl EcdsaCurve {
    /// Field size in bytes. Equals the digest truncation length.
    pub const fn field_size(self) -> usize {
        match self {
            Self::NistP192 => 24,
            Self::NistP256 => 32,
        }
    }

    /// SEC2 curve name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NistP192 => "secp192r1",
            Self::NistP256 => "secp256r1",
        }
    }
}

/// A parsed meter public key, bound to its curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcdsaPublicKey {
    /// Verifying key on secp192r1.
    P192(P192VerifyingKey),
    /// Verifying key on secp256r1.
    P256(P256VerifyingKey),
}

impl EcdsaPublicKey {
    /// Curve this key lives on.
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            Self::P192(_) => EcdsaCurve::NistP192,
            Self::P256(_) => EcdsaCurve::NistP256,
        }
    }
}

/// ECDSA engine for one named curve.
///
/// One engine instance per crypto provider; the provider decides the
/// digest truncation by asking `digest_length`.
#[derive(Clone, Copy, Debug)]
pub struct SignatureEngine {
    curve: EcdsaCurve,
}

impl SignatureEngine {
    /// Create an engine for the given curve.
    pub const fn new(curve: EcdsaCurve) -> Self {
        Self { curve }
    }

    /// The engine's curve.
    pub const fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    /// Number of digest bytes consumed for signing/verification.
    pub const fn digest_length(&self) -> usize {
        self.curve.field_size()
    }

    /// Parse a SEC1 hex public key for this engine's curve.
    pub fn parse_public_key(&self, hex_key: &str) -> Result<EcdsaPublicKey, CryptoError> {
        let bytes = decode_hex(hex_key).map_err(|_| CryptoError::InvalidPublicKey)?;
        match self.curve {
            EcdsaCurve::NistP192 => P192VerifyingKey::from_sec1_bytes(&bytes)
                .map(EcdsaPublicKey::P192)
                .map_err(|_| CryptoError::InvalidPublicKey),
            EcdsaCurve::NistP256 => P256VerifyingKey::from_sec1_bytes(&bytes)
                .map(EcdsaPublicKey::P256)
                .map_err(|_| CryptoError::InvalidPublicKey),
        }
    }

    /// Verify a signature over a truncated digest. Fails closed: any
    /// malformed signature, digest-length mismatch, curve mismatch or
    /// library failure yields `false`.
    pub fn verify(&self, key: &EcdsaPublicKey, prehash: &[u8], signature: &EccSignature) -> bool {
        if prehash.len() != self.digest_length() {
            return false;
        }

        match (key, self.curve) {
            (EcdsaPublicKey::P192(vk), EcdsaCurve::NistP192) => parse_p192(signature)
                .map(|sig| vk.verify_prehash(prehash, &sig).is_ok())
                .unwrap_or(false),
            (EcdsaPublicKey::P256(vk), EcdsaCurve::NistP256) => parse_p256(signature)
                .map(|sig| vk.verify_prehash(prehash, &sig).is_ok())
                .unwrap_or(false),
            // Key from a different curve never verifies.
            _ => false,
        }
    }

    /// Sign a truncated digest with a caller-supplied hex private key.
    ///
    /// The output carries the requested wire format: DER hex or a
    /// decimal (r, s) pair.
    pub fn sign(
        &self,
        private_key_hex: &str,
        prehash: &[u8],
        algorithm: &str,
        format: SignatureFormat,
    ) -> Result<EccSignature, CryptoError> {
        if prehash.len() != self.digest_length() {
            return Err(CryptoError::InvalidDigestLength {
                expected: self.digest_length(),
                actual: prehash.len(),
            });
        }

        let mut key_bytes =
            decode_hex(private_key_hex).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let result = match self.curve {
            EcdsaCurve::NistP192 => sign_p192(&key_bytes, prehash, algorithm, format),
            EcdsaCurve::NistP256 => sign_p256(&key_bytes, prehash, algorithm, format),
        };
        key_bytes.zeroize();
        result
    }
}

// =============================================================================
// PER-CURVE BINDINGS
// =============================================================================

// The p192 crate ships ECDSA verification only, so signing is assembled
// here from the curve arithmetic with RFC 6979 nonces, the same way the
// generic `ecdsa` stack does it for the other curves.
fn sign_p192(
    key_bytes: &[u8],
    prehash: &[u8],
    algorithm: &str,
    format: SignatureFormat,
) -> Result<EccSignature, CryptoError> {
    let secret =
        P192SecretKey::from_slice(key_bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
    let d = secret.to_nonzero_scalar();

    let z_bytes = p192::FieldBytes::clone_from_slice(prehash);
    let z = p192::Scalar::reduce_bytes(&z_bytes);

    let k = p192_nonce(&d, &z)?;

    let big_r = (P192ProjectivePoint::GENERATOR * *k).to_affine();
    let r = p192::Scalar::reduce_bytes(&big_r.x());
    let s = *k.invert() * (z + r * *d);
    if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
        return Err(CryptoError::SigningFailed);
    }

    let sig = P192Signature::from_scalars(r.to_repr(), s.to_repr())
        .map_err(|_| CryptoError::SigningFailed)?;

    Ok(match format {
        SignatureFormat::Der => EccSignature::der(algorithm, hex::encode(sig.to_der().to_bytes())),
        SignatureFormat::Rs => {
            let bytes = sig.to_bytes();
            let (r, s) = bytes.split_at(24);
            EccSignature::rs(
                algorithm,
                U256::from_big_endian(r).to_string(),
                U256::from_big_endian(s).to_string(),
            )
        }
    })
}

// Deterministic nonce per RFC 6979. The crate's one-shot `generate_k`
// requires the digest output to match the scalar width, which SHA-256
// cannot satisfy on a 192-bit curve, so the HMAC-DRBG building block is
// driven directly and its candidates rejection-sampled into the field.
fn p192_nonce(
    d: &P192NonZeroScalar,
    z: &p192::Scalar,
) -> Result<P192NonZeroScalar, CryptoError> {
    let d_repr = d.to_repr();
    let z_repr = z.to_repr();
    let mut drbg = rfc6979::HmacDrbg::<Sha256>::new(&d_repr, &z_repr, &[]);
    // Rejection-sample candidates into [1, n), bounded so a broken
    // DRBG cannot loop forever.
    for _ in 0..100 {
        let mut k_bytes = p192::FieldBytes::default();
        drbg.fill_bytes(&mut k_bytes);
        if let Some(k) = Option::<P192NonZeroScalar>::from(P192NonZeroScalar::from_repr(k_bytes)) {
            return Ok(k);
        }
    }
    Err(CryptoError::SigningFailed)
}

fn sign_p256(
    key_bytes: &[u8],
    prehash: &[u8],
    algorithm: &str,
    format: SignatureFormat,
) -> Result<EccSignature, CryptoError> {
    let signing_key =
        P256SigningKey::from_slice(key_bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
    let sig: P256Signature = signing_key
        .sign_prehash(prehash)
        .map_err(|_| CryptoError::SigningFailed)?;

    Ok(match format {
        SignatureFormat::Der => EccSignature::der(algorithm, hex::encode(sig.to_der().to_bytes())),
        SignatureFormat::Rs => {
            let bytes = sig.to_bytes();
            let (r, s) = bytes.split_at(32);
            EccSignature::rs(
                algorithm,
                U256::from_big_endian(r).to_string(),
                U256::from_big_endian(s).to_string(),
            )
        }
    })
}

fn parse_p192(sig: &EccSignature) -> Result<P192Signature, CryptoError> {
    match sig.format {
        SignatureFormat::Der => {
            let bytes = der_bytes(sig)?;
            P192Signature::from_der(&bytes).map_err(|_| CryptoError::InvalidSignatureFormat)
        }
        SignatureFormat::Rs => {
            let (r, s) = rs_components::<24>(sig, "secp192r1")?;
            P192Signature::from_scalars(r, s).map_err(|_| CryptoError::InvalidSignatureFormat)
        }
    }
}

fn parse_p256(sig: &EccSignature) -> Result<P256Signature, CryptoError> {
    match sig.format {
        SignatureFormat::Der => {
            let bytes = der_bytes(sig)?;
            P256Signature::from_der(&bytes).map_err(|_| CryptoError::InvalidSignatureFormat)
        }
        SignatureFormat::Rs => {
            let (r, s) = rs_components::<32>(sig, "secp256r1")?;
            P256Signature::from_scalars(r, s).map_err(|_| CryptoError::InvalidSignatureFormat)
        }
    }
}

// =============================================================================
// COMPONENT PARSING
// =============================================================================

fn der_bytes(sig: &EccSignature) -> Result<Vec<u8>, CryptoError> {
    let hex_value = sig
        .value
        .as_deref()
        .ok_or(CryptoError::InvalidSignatureFormat)?;
    decode_hex(hex_value).map_err(|_| CryptoError::InvalidSignatureFormat)
}

fn rs_components<const N: usize>(
    sig: &EccSignature,
    curve: &'static str,
) -> Result<([u8; N], [u8; N]), CryptoError> {
    let r = sig.r.as_deref().ok_or(CryptoError::InvalidSignatureFormat)?;
    let s = sig.s.as_deref().ok_or(CryptoError::InvalidSignatureFormat)?;
    Ok((
        decimal_component::<N>(r, curve)?,
        decimal_component::<N>(s, curve)?,
    ))
}

/// Parse a decimal-string integer into an N-byte big-endian scalar.
/// Errors when the value does not fit the curve's field size.
fn decimal_component<const N: usize>(
    dec: &str,
    curve: &'static str,
) -> Result<[u8; N], CryptoError> {
    let value =
        U256::from_dec_str(dec.trim()).map_err(|_| CryptoError::InvalidSignatureFormat)?;
    let mut wide = [0u8; 32];
    value.to_big_endian(&mut wide);

    if wide[..32 - N].iter().any(|&b| b != 0) {
        return Err(CryptoError::ComponentOutOfRange { curve });
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&wide[32 - N..]);
    Ok(out)
}

/// Decode hex with an optional `0x` prefix. Odd length is malformed.
fn decode_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(stripped)
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Keypair generation for test fixtures. Not part of the production
/// surface; enable the `test-helpers` feature to use it downstream.
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;

    /// Generate a keypair for the given curve; returns hex-encoded
    /// (private key, uncompressed SEC1 public key).
    pub fn generate_keypair(curve: EcdsaCurve) -> (String, String) {
        use p192::elliptic_curve::sec1::ToEncodedPoint;

        match curve {
            EcdsaCurve::NistP192 => {
                let sk = P192SecretKey::random(&mut rand::thread_rng());
                let pk = sk.public_key().to_encoded_point(false);
                (hex::encode(sk.to_bytes()), hex::encode(pk.as_bytes()))
            }
            EcdsaCurve::NistP256 => {
                let sk = p256::SecretKey::random(&mut rand::thread_rng());
                let pk = sk.public_key().to_encoded_point(false);
                (hex::encode(sk.to_bytes()), hex::encode(pk.as_bytes()))
            }
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
