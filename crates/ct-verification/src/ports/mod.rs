//! # Ports (Hexagonal Architecture)
//!
//! Inbound ports are the operations callers drive the subsystem with;
//! outbound ports are the dependencies the domain needs fulfilled.

pub mod inbound;
pub mod outbound;

pub use inbound::MeasurementVerificationApi;
pub use outbound::MeterKeyStore;
