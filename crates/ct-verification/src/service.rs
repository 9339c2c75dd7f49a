//! # Verification Service
//!
//! Wires the crypto providers and session aggregation to a key store
//! and exposes them through the inbound port.

use tracing::debug;

use crate::domain::entities::{CryptoResult, SessionReport};
use crate::domain::errors::SignError;
use crate::domain::provider::CryptoProvider;
use crate::domain::session::{self, AggregationMode};
use crate::ports::inbound::MeasurementVerificationApi;
use crate::ports::outbound::MeterKeyStore;
use shared_types::{AuthorizationStart, ChargingSession, Measurement, MeasurementValue};

/// Verification subsystem facade over a meter key store.
#[derive(Debug)]
pub struct VerificationService<S: MeterKeyStore> {
    store: S,
    aggregation: AggregationMode,
}

impl<S: MeterKeyStore> VerificationService<S> {
    /// Create a service with the default whole-session aggregation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            aggregation: AggregationMode::default(),
        }
    }

    /// Override the session aggregation mode.
    pub fn with_aggregation(mut self, aggregation: AggregationMode) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// The configured aggregation mode.
    pub fn aggregation(&self) -> AggregationMode {
        self.aggregation
    }

    /// The backing key store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: MeterKeyStore> MeasurementVerificationApi for VerificationService<S> {
    fn verify_measurement(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
    ) -> Option<CryptoResult> {
        let Some(provider) = CryptoProvider::for_measurement(measurement) else {
            debug!(
                meter = %measurement.energy_meter_id,
                algorithm = %measurement.signature_info.algorithm,
                "unsupported signature algorithm"
            );
            return value
                .signatures
                .first()
                .cloned()
                .map(CryptoResult::unknown_format);
        };
        let outcome = provider.verify_measurement(measurement, value, authorization, &self.store);
        if let Some(result) = &outcome {
            debug!(
                meter = %measurement.energy_meter_id,
                status = ?result.status,
                "measurement value verified"
            );
        }
        outcome
    }

    fn sign_measurement(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
        private_key_hex: &str,
        public_key_hex: Option<&str>,
    ) -> Result<CryptoResult, SignError> {
        let provider = CryptoProvider::for_measurement(measurement).ok_or_else(|| {
            SignError::UnsupportedAlgorithm(measurement.signature_info.algorithm.clone())
        })?;
        provider.sign_measurement(
            measurement,
            value,
            authorization,
            private_key_hex,
            public_key_hex,
        )
    }

    fn verify_session(&self, session: &ChargingSession) -> SessionReport {
        debug!(
            session = %session.id,
            measurements = session.measurements.len(),
            mode = ?self.aggregation,
            "verifying session"
        );
        session::verify_session(session, &self.store, self.aggregation)
    }
}
