//! # Shared Crypto - Meter Record Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `digest` | SHA-256 | Canonical record-buffer digests |
//! | `ecdsa` | ECDSA P-192 / P-256 | Meter signature sign/verify |
//!
//! ## Security Properties
//!
//! - **SHA-256**: digests are truncated to the curve field size at the
//!   caller, not here; the digest itself is format-agnostic.
//! - **ECDSA**: RFC 6979 deterministic nonces, prehash interfaces only
//!   (the record digest is the message), fail-closed verification.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod digest;
pub mod ecdsa;
pub mod errors;

// Re-exports
pub use digest::{sha256, sha256_hex};
pub use ecdsa::{EcdsaCurve, EcdsaPublicKey, SignatureEngine};
pub use errors::CryptoError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
