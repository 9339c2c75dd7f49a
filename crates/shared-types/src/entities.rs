//! # Core Domain Entities
//!
//! Defines the charging-session data model as delivered by the outer
//! session-document parser.
//!
//! ## Clusters
//!
//! - **Session**: `ChargingSession`, `AuthorizationStart`, `Measurement`,
//!   `MeasurementValue`
//! - **Keys & Signatures**: `Meter`, `MeterPublicKey`, `EccSignature`,
//!   `SignatureInfo`, `SignatureFormat`
//! - **Results**: `VerificationStatus`, `SessionStatus`

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: THE CHARGING SESSION
// =============================================================================

/// A complete charging session as parsed from a transparency record.
///
/// Owns its measurements in document order; the authorization record is
/// shared by every measurement in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingSession {
    /// Session identifier from the outer document.
    #[serde(default)]
    pub id: String,
    /// Authorization that started the session (id + timestamp).
    pub authorization_start: AuthorizationStart,
    /// All measurements of this session, in document order.
    pub measurements: Vec<Measurement>,
}

/// The authorization event that started a charging session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationStart {
    /// Authorization identifier (RFID UID, eMAID, ...).
    pub id: String,
    /// Unix timestamp (seconds) of the authorization.
    pub timestamp: i64,
}

/// One metered quantity of a charging session, e.g. active energy import.
///
/// Owns an ordered sequence of measurement values; a meaningful
/// measurement records at least a start and a stop value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier of the energy meter that produced the values.
    pub energy_meter_id: String,
    /// OBIS code of the metered quantity, hex or dotted notation.
    pub obis: String,
    /// Unit of the raw value, encoded per IEC 62056-6-2.
    pub unit_encoded: i8,
    /// Decimal scale factor exponent applied to the raw value.
    pub scale: i8,
    /// Signature algorithm and wire format used by the meter firmware.
    pub signature_info: SignatureInfo,
    /// Recorded values in chronological order (start, ..., stop).
    pub values: Vec<MeasurementValue>,
}

/// A single signed meter reading.
///
/// The optional fields exist only in the richer vendor format; the
/// format descriptor decides which of them the canonical buffer carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementValue {
    /// Unix timestamp (seconds) of the reading.
    pub timestamp: i64,
    /// Raw measured quantity before unit/scale interpretation.
    pub value: u64,
    /// Meter status word, hex encoded.
    #[serde(default)]
    pub info_status: Option<String>,
    /// Seconds counter of the meter firmware.
    #[serde(default)]
    pub seconds_index: Option<u32>,
    /// Pagination counter, hex encoded.
    #[serde(default)]
    pub pagination_id: Option<String>,
    /// Log book index, hex encoded.
    #[serde(default)]
    pub log_book_index: Option<String>,
    /// Signatures attached to this reading. Empty means not verifiable.
    #[serde(default)]
    pub signatures: Vec<EccSignature>,
}

// =============================================================================
// CLUSTER B: METERS, KEYS & SIGNATURES
// =============================================================================

/// An energy meter and its registered public keys.
///
/// Supplied by the external meter key store; the verification core
/// never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meter {
    /// Meter identifier, matched against `Measurement::energy_meter_id`.
    pub id: String,
    /// Registered public keys, most recent first. Index 0 is active.
    pub public_keys: Vec<MeterPublicKey>,
}

/// A meter public key as stored in the key store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterPublicKey {
    /// SEC1-encoded point, hex.
    pub value: String,
    /// Key format tag as recorded by the key store.
    pub format: String,
}

/// Wire format of an ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureFormat {
    /// ASN.1 DER encoded byte string.
    Der,
    /// Raw (r, s) pair of decimal-string integers.
    Rs,
}

/// Signature algorithm and format a measurement's meter firmware uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// Algorithm descriptor, e.g. `"ECC secp192r1"`.
    pub algorithm: String,
    /// Wire format of attached signatures.
    pub format: SignatureFormat,
}

/// An ECDSA signature in either DER or (r, s) representation.
///
/// Exactly one of `value` or the `r`/`s` pair is populated, matching
/// `format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EccSignature {
    /// Algorithm descriptor, e.g. `"ECC secp192r1"`.
    pub algorithm: String,
    /// Representation carried by this signature.
    pub format: SignatureFormat,
    /// DER bytes, hex encoded. Populated when `format` is `Der`.
    #[serde(default)]
    pub value: Option<String>,
    /// R component as a decimal-string integer. Populated for `Rs`.
    #[serde(default)]
    pub r: Option<String>,
    /// S component as a decimal-string integer. Populated for `Rs`.
    #[serde(default)]
    pub s: Option<String>,
}

impl EccSignature {
    /// Build a DER-format signature.
    pub fn der(algorithm: impl Into<String>, der_hex: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            format: SignatureFormat::Der,
            value: Some(der_hex.into()),
            r: None,
            s: None,
        }
    }

    /// Build an (r, s)-format signature from decimal-string components.
    pub fn rs(
        algorithm: impl Into<String>,
        r: impl Into<String>,
        s: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            format: SignatureFormat::Rs,
            value: None,
            r: Some(r.into()),
            s: Some(s.into()),
        }
    }
}

// =============================================================================
// CLUSTER C: VERIFICATION RESULTS
// =============================================================================

/// Terminal outcome of verifying (or signing) one measurement value.
///
/// Every internal parse or curve-library failure is mapped to one of
/// these members; none of them is ever raised as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Signature checks out against the meter's active public key.
    ValidSignature,
    /// Key parsed but the signature check failed or errored.
    InvalidSignature,
    /// The stored public key could not be parsed.
    InvalidPublicKey,
    /// Meter is known but has no registered public key.
    PublicKeyNotFound,
    /// Meter id is unknown to the key store.
    EnergyMeterNotFound,
    /// The record could not be encoded into its canonical buffer.
    UnknownCtrFormat,
}

/// Aggregated verdict over all measurement values of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Every verified value of every qualifying measurement is valid.
    ValidSignature,
    /// At least one value failed verification.
    InvalidSignature,
    /// No measurement in the session qualified for verification.
    UnknownSessionFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> ChargingSession {
        ChargingSession {
            id: "DE*GEF*E12345678*1".into(),
            authorization_start: AuthorizationStart {
                id: "71234ABC".into(),
                timestamp: 1_551_435_490,
            },
            measurements: vec![Measurement {
                energy_meter_id: "1EMH0008".into(),
                obis: "1-1:1.8.0".into(),
                unit_encoded: 30,
                scale: -1,
                signature_info: SignatureInfo {
                    algorithm: "ECC secp192r1".into(),
                    format: SignatureFormat::Rs,
                },
                values: vec![MeasurementValue {
                    timestamp: 1_551_435_500,
                    value: 2935,
                    info_status: Some("08".into()),
                    seconds_index: Some(12_345),
                    pagination_id: Some("0000cf28".into()),
                    log_book_index: Some("0006".into()),
                    signatures: vec![EccSignature::rs("ECC secp192r1", "123", "456")],
                }],
            }],
        }
    }

    #[test]
    fn test_session_json_roundtrip() {
        let session = sample_session();
        let json = serde_json::to_string(&session).unwrap();
        let back: ChargingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.measurements.len(), 1);
        assert_eq!(back.measurements[0].values[0].value, 2935);
        assert_eq!(back.authorization_start, session.authorization_start);
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let json = r#"{"timestamp":1551435500,"value":2935}"#;
        let value: MeasurementValue = serde_json::from_str(json).unwrap();
        assert!(value.info_status.is_none());
        assert!(value.seconds_index.is_none());
        assert!(value.signatures.is_empty());
    }

    #[test]
    fn test_signature_constructors() {
        let der = EccSignature::der("ECC secp256r1", "3045..");
        assert_eq!(der.format, SignatureFormat::Der);
        assert!(der.r.is_none());

        let rs = EccSignature::rs("ECC secp192r1", "17", "42");
        assert_eq!(rs.format, SignatureFormat::Rs);
        assert_eq!(rs.r.as_deref(), Some("17"));
        assert!(rs.value.is_none());
    }
}
