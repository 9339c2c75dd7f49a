//! # Measurement Verification Subsystem
//!
//! Verifies cryptographic integrity of energy-meter measurement records
//! collected during EV charging sessions, for the vendor meter-firmware
//! formats ChargeTrace supports.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure logic, no I/O: canonical buffer
//!   encoding, format descriptors, the crypto provider decision path and
//!   session aggregation
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound
//!   interfaces (`MeasurementVerificationApi`, `MeterKeyStore`)
//! - **Adapters Layer** (`adapters/`): In-memory meter key store
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Guarantees
//!
//! - Verification outcomes are always typed values; curve-library and
//!   parse failures never escape as panics or errors.
//! - One fresh 320-byte buffer per verification attempt; inputs are
//!   never mutated.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::store::InMemoryMeterStore;
pub use domain::encoder::{CryptoBuffer, EncodeError, BUFFER_SIZE};
pub use domain::entities::{CryptoResult, MeasurementReport, RecordSnapshot, SessionReport};
pub use domain::errors::SignError;
pub use domain::format::{FieldEncoding, FormatDescriptor, VendorFormat};
pub use domain::provider::CryptoProvider;
pub use domain::session::AggregationMode;
pub use ports::inbound::MeasurementVerificationApi;
pub use ports::outbound::MeterKeyStore;
pub use service::VerificationService;
