//! # ChargeTrace Test Suite
//!
//! Unified test crate for cross-crate flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end verification flows
//!     ├── flows.rs      # Sign, tamper and verify across crates
//!     └── documents.rs  # Session documents parsed from JSON
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ct-tests
//!
//! # By category
//! cargo test -p ct-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
/// Lets `RUST_LOG=ct_verification=debug cargo test -p ct-tests` show
/// the verification decision path.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
