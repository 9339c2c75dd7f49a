//! # Verification Result Entities
//!
//! Per-attempt results and the session-level report. Results are owned
//! by the report and keyed by value position; the input entities are
//! never mutated.

use serde::{Deserialize, Serialize};
use shared_types::{EccSignature, SessionStatus, VerificationStatus};

/// Canonical audit strings of every field written into the buffer, in
/// the form the buffer actually carries them. Optional entries exist
/// only in formats that serialize those fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Meter identifier as written.
    pub meter_id: String,
    /// Measurement timestamp, decimal epoch seconds.
    pub timestamp: String,
    /// Status word, lowercase hex.
    pub info_status: Option<String>,
    /// Seconds counter, decimal.
    pub seconds_index: Option<String>,
    /// Pagination counter, lowercase hex in stored (LE) byte order.
    pub pagination_id: Option<String>,
    /// OBIS code, lowercase hex.
    pub obis: String,
    /// Encoded unit, decimal.
    pub unit_encoded: String,
    /// Scale exponent, decimal.
    pub scale: String,
    /// Raw value, decimal.
    pub value: String,
    /// Log book index, lowercase hex.
    pub log_book_index: Option<String>,
    /// Authorization identifier as written.
    pub authorization_id: String,
    /// Authorization timestamp, decimal epoch seconds.
    pub authorization_timestamp: String,
}

/// Outcome of one verification or signing attempt for one measurement
/// value. Created fresh per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoResult {
    /// Terminal status of the attempt.
    pub status: VerificationStatus,
    /// Truncated digest, lowercase hex. Absent when encoding failed.
    pub digest: Option<String>,
    /// Reconstructed field strings. Absent when encoding failed.
    pub snapshot: Option<RecordSnapshot>,
    /// Public key the check ran against, lowercase hex.
    pub public_key: Option<String>,
    /// Key format tag from the key store.
    pub public_key_format: Option<String>,
    /// The signature checked (verification) or produced (signing).
    pub signature: Option<EccSignature>,
}

/// Per-measurement slice of a session report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementReport {
    /// Meter that produced the measurement.
    pub energy_meter_id: String,
    /// Whether the measurement qualified for verification (a known
    /// format and at least start + stop values).
    pub qualified: bool,
    /// One entry per measurement value, in document order. `None`
    /// means the value carried no signature and is not verifiable.
    pub values: Vec<Option<CryptoResult>>,
}

/// Session-level verification report: the folded verdict plus every
/// per-value outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Aggregated verdict over the whole session.
    pub status: SessionStatus,
    /// Per-measurement outcomes, in document order.
    pub measurements: Vec<MeasurementReport>,
}

impl CryptoResult {
    /// A result for a record that could not be encoded into its
    /// canonical buffer.
    pub(crate) fn unknown_format(signature: EccSignature) -> Self {
        Self {
            status: VerificationStatus::UnknownCtrFormat,
            digest: None,
            snapshot: None,
            public_key: None,
            public_key_format: None,
            signature: Some(signature),
        }
    }
}
