//! # Outbound Ports
//!
//! Dependencies the verification domain needs fulfilled by adapters.

use shared_types::Meter;

/// Read access to registered meters and their public keys.
///
/// Lookups are by exact meter identifier. The store owns key rotation
/// history; index 0 of a meter's key list is the active key.
pub trait MeterKeyStore: Send + Sync {
    /// Fetch a meter by identifier. `None` when unregistered.
    fn lookup(&self, meter_id: &str) -> Option<Meter>;
}
