//! # SHA-256 Record Digests
//!
//! Digest of a canonical record buffer. Pure and deterministic; the
//! truncation to a curve's field size happens at the signature-engine
//! call site, never here.

use sha2::{Digest, Sha256};

/// SHA-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash data with SHA-256 and render as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
