//! # Shared Types Crate
//!
//! This crate contains the charging-session domain entities consumed by
//! the verification subsystem: sessions, measurements, meters, public
//! keys, signatures and the verification result taxonomy.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-crate types are defined here.
//! - **Immutable Inputs**: entities carry no mutable result slots; the
//!   verifier returns results separately, keyed by value position.
//! - **Parsed Upstream**: all values arrive as already-parsed in-memory
//!   structures from an external session-document parser. No I/O here.

pub mod entities;
pub mod obis;

pub use entities::*;
pub use obis::{obis_bytes, ObisError};
