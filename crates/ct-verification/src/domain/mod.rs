//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod encoder;
pub mod entities;
pub mod errors;
pub mod format;
pub mod provider;
pub mod session;
