//! # In-Memory Meter Store
//!
//! HashMap-backed key store, used in tests and by embedders that load
//! meter registrations from a charge transparency document up front.

use std::collections::HashMap;

use crate::ports::outbound::MeterKeyStore;
use shared_types::Meter;

/// In-memory implementation of [`MeterKeyStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeterStore {
    meters: HashMap<String, Meter>,
}

impl InMemoryMeterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an iterator of meters.
    pub fn from_meters(meters: impl IntoIterator<Item = Meter>) -> Self {
        Self {
            meters: meters
                .into_iter()
                .map(|meter| (meter.id.clone(), meter))
                .collect(),
        }
    }

    /// Register a meter, replacing any previous registration with the
    /// same identifier.
    pub fn register(&mut self, meter: Meter) {
        self.meters.insert(meter.id.clone(), meter);
    }

    /// Number of registered meters.
    pub fn len(&self) -> usize {
        self.meters.len()
    }

    /// Whether the store has no registrations.
    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }
}

impl MeterKeyStore for InMemoryMeterStore {
    fn lookup(&self, meter_id: &str) -> Option<Meter> {
        self.meters.get(meter_id).cloned()
    }
}
