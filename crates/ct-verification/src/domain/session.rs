//! # Session Aggregation
//!
//! Folds per-value verification outcomes into one session verdict.
//!
//! A measurement qualifies when its signature algorithm names a known
//! format and it carries at least a start and a stop value. The default
//! fold is a monotone downgrade over the whole session: once any
//! verified value fails, the session verdict stays `InvalidSignature`.
//! The legacy mode instead resets the verdict at every qualifying
//! measurement, so a later all-valid measurement can mask an earlier
//! failure; it exists only for byte-level report compatibility with
//! older tooling.
//!
//! Values inside one measurement are independent of each other, so they
//! are verified in parallel; outcomes are collected back in document
//! order.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::entities::{CryptoResult, MeasurementReport, SessionReport};
use crate::domain::provider::CryptoProvider;
use crate::ports::outbound::MeterKeyStore;
use shared_types::{ChargingSession, SessionStatus, VerificationStatus};

/// Fewest values a measurement needs to qualify (start + stop).
pub const MIN_MEASUREMENT_VALUES: usize = 2;

/// How per-measurement verdicts fold into the session verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationMode {
    /// Monotone downgrade over the whole session.
    #[default]
    WholeSession,
    /// Legacy fold: the verdict resets at each qualifying measurement.
    PerMeasurementCompat,
}

/// Verify every measurement value of a session and fold the outcomes.
///
/// The report carries one entry per measurement and one outcome slot
/// per value, both in document order. Sessions where no measurement
/// qualifies report `UnknownSessionFormat`.
pub fn verify_session(
    session: &ChargingSession,
    store: &dyn MeterKeyStore,
    mode: AggregationMode,
) -> SessionReport {
    let mut status = SessionStatus::UnknownSessionFormat;
    let mut measurements = Vec::with_capacity(session.measurements.len());

    for measurement in &session.measurements {
        let provider = CryptoProvider::for_measurement(measurement);
        let qualified =
            provider.is_some() && measurement.values.len() >= MIN_MEASUREMENT_VALUES;

        let outcomes: Vec<Option<CryptoResult>> = match &provider {
            Some(provider) => measurement
                .values
                .par_iter()
                .map(|value| {
                    provider.verify_measurement(
                        measurement,
                        value,
                        &session.authorization_start,
                        store,
                    )
                })
                .collect(),
            None => {
                warn!(
                    meter = %measurement.energy_meter_id,
                    algorithm = %measurement.signature_info.algorithm,
                    "unsupported signature algorithm"
                );
                measurement
                    .values
                    .iter()
                    .map(|value| {
                        value
                            .signatures
                            .first()
                            .cloned()
                            .map(CryptoResult::unknown_format)
                    })
                    .collect()
            }
        };

        if qualified {
            if mode == AggregationMode::PerMeasurementCompat
                || status == SessionStatus::UnknownSessionFormat
            {
                status = SessionStatus::ValidSignature;
            }
            for outcome in &outcomes {
                // An unsigned value inside a qualifying measurement is
                // a gap in the evidence chain and downgrades too.
                let valid = matches!(
                    outcome,
                    Some(result) if result.status == VerificationStatus::ValidSignature
                );
                if !valid {
                    status = SessionStatus::InvalidSignature;
                }
            }
        }

        debug!(
            meter = %measurement.energy_meter_id,
            values = measurement.values.len(),
            qualified,
            "measurement verified"
        );
        measurements.push(MeasurementReport {
            energy_meter_id: measurement.energy_meter_id.clone(),
            qualified,
            values: outcomes,
        });
    }

    SessionReport {
        status,
        measurements,
    }
}
