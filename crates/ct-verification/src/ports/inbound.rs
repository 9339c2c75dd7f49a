//! # Inbound Ports
//!
//! What callers can ask of the verification subsystem.

use crate::domain::entities::{CryptoResult, SessionReport};
use crate::domain::errors::SignError;
use shared_types::{AuthorizationStart, ChargingSession, Measurement, MeasurementValue};

/// Driving interface of the verification subsystem.
///
/// Implementations are stateless per call and safe to share across
/// threads. Verification never mutates its inputs; results are
/// returned, not written back.
pub trait MeasurementVerificationApi: Send + Sync {
    /// Verify one measurement value.
    ///
    /// `None` when the value carries no signature. Otherwise the
    /// result's status is terminal; this operation does not error.
    fn verify_measurement(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
    ) -> Option<CryptoResult>;

    /// Sign one measurement value with a caller-supplied private key.
    ///
    /// The optional public key is echoed into the result for audit
    /// display; it is not derived from the private key.
    fn sign_measurement(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
        private_key_hex: &str,
        public_key_hex: Option<&str>,
    ) -> Result<CryptoResult, SignError>;

    /// Verify a whole charging session and fold the outcomes into one
    /// session verdict.
    fn verify_session(&self, session: &ChargingSession) -> SessionReport;
}
