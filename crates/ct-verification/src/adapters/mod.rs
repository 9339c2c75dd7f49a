//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod store;

pub use store::InMemoryMeterStore;
