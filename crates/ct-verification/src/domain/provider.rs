//! # Crypto Provider
//!
//! The per-format verification/signing path: encode the canonical
//! buffer, digest it, truncate to the curve's field size, then check
//! (or produce) the ECDSA signature. One generic path configured by a
//! format descriptor; the vendor variants differ only in configuration.
//!
//! ## Decision Path (verification)
//!
//! Terminal at the first applicable branch:
//! 1. value carries no signature       → not verifiable (`None`)
//! 2. record does not encode           → `UnknownCtrFormat`
//! 3. meter id unknown to the store    → `EnergyMeterNotFound`
//! 4. meter has no registered key      → `PublicKeyNotFound`
//! 5. stored key does not parse        → `InvalidPublicKey`
//! 6. check fails or errors            → `InvalidSignature`
//!    check succeeds                   → `ValidSignature`

use crate::domain::encoder::{CryptoBuffer, EncodeError};
use crate::domain::entities::{CryptoResult, RecordSnapshot};
use crate::domain::errors::SignError;
use crate::domain::format::{layout, FieldEncoding, FormatDescriptor, VendorFormat};
use crate::ports::outbound::MeterKeyStore;
use shared_crypto::{sha256, SignatureEngine};
use shared_types::{
    obis_bytes, AuthorizationStart, EccSignature, Measurement, MeasurementValue,
    VerificationStatus,
};
use tracing::debug;

/// Verification/signing engine for one vendor format.
#[derive(Debug)]
pub struct CryptoProvider {
    descriptor: &'static FormatDescriptor,
    engine: SignatureEngine,
}

impl CryptoProvider {
    /// Create the provider for a vendor format.
    pub fn new(format: VendorFormat) -> Self {
        let descriptor = format.descriptor();
        Self {
            descriptor,
            engine: SignatureEngine::new(descriptor.curve),
        }
    }

    /// Select the provider for a measurement from its signature
    /// algorithm. `None` when the algorithm names no supported format.
    pub fn for_measurement(measurement: &Measurement) -> Option<Self> {
        VendorFormat::from_algorithm(&measurement.signature_info.algorithm).map(Self::new)
    }

    /// The provider's vendor format.
    pub fn format(&self) -> VendorFormat {
        self.descriptor.format
    }

    /// The provider's signature engine.
    pub fn engine(&self) -> &SignatureEngine {
        &self.engine
    }

    /// Encode the canonical 320-byte buffer for one measurement value.
    ///
    /// Returns the buffer and the canonical audit strings of every
    /// field written. A fresh buffer per call; inputs are not mutated.
    pub fn encode_record(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
    ) -> Result<(CryptoBuffer, RecordSnapshot), EncodeError> {
        let d = self.descriptor;
        let mut buffer = CryptoBuffer::new();

        let meter_id = match d.meter_id_encoding {
            FieldEncoding::Text => buffer.set_text(
                &measurement.energy_meter_id,
                layout::METER_ID,
                layout::METER_ID_WIDTH,
            )?,
            FieldEncoding::Hex => buffer.set_hex(
                &measurement.energy_meter_id,
                layout::METER_ID,
                layout::METER_ID_WIDTH,
                false,
            )?,
        };
        let timestamp = buffer.set_timestamp32(value.timestamp, layout::TIMESTAMP)?;

        let (info_status, seconds_index, pagination_id) = if d.carries_status_fields {
            let info = value
                .info_status
                .as_deref()
                .ok_or(EncodeError::MissingField("info_status"))?;
            let seconds = value
                .seconds_index
                .ok_or(EncodeError::MissingField("seconds_index"))?;
            let pagination = value
                .pagination_id
                .as_deref()
                .ok_or(EncodeError::MissingField("pagination_id"))?;
            (
                Some(buffer.set_hex(
                    info,
                    layout::INFO_STATUS,
                    layout::INFO_STATUS_WIDTH,
                    false,
                )?),
                Some(buffer.set_u32(seconds, layout::SECONDS_INDEX)?),
                // Pagination counter is hex but stored little-endian.
                Some(buffer.set_hex(
                    pagination,
                    layout::PAGINATION_ID,
                    layout::PAGINATION_WIDTH,
                    true,
                )?),
            )
        } else {
            (None, None, None)
        };

        let obis = buffer.set_bytes(&obis_bytes(&measurement.obis)?, layout::OBIS, 6)?;
        let unit_encoded = buffer.set_i8(measurement.unit_encoded, layout::UNIT)?;
        let scale = buffer.set_i8(measurement.scale, layout::SCALE)?;
        let raw_value = buffer.set_u64(value.value, layout::VALUE)?;

        let log_book_index = if d.carries_status_fields {
            let log_book = value
                .log_book_index
                .as_deref()
                .ok_or(EncodeError::MissingField("log_book_index"))?;
            Some(buffer.set_hex(log_book, layout::LOG_BOOK, layout::LOG_BOOK_WIDTH, false)?)
        } else {
            None
        };

        let authorization_id = match d.authorization_id_encoding {
            FieldEncoding::Text => buffer.set_text(
                &authorization.id,
                layout::AUTH_ID,
                layout::AUTH_ID_WIDTH,
            )?,
            FieldEncoding::Hex => buffer.set_hex(
                &authorization.id,
                layout::AUTH_ID,
                layout::AUTH_ID_WIDTH,
                false,
            )?,
        };
        let authorization_timestamp =
            buffer.set_timestamp32(authorization.timestamp, layout::AUTH_TIMESTAMP)?;

        let snapshot = RecordSnapshot {
            meter_id,
            timestamp,
            info_status,
            seconds_index,
            pagination_id,
            obis,
            unit_encoded,
            scale,
            value: raw_value,
            log_book_index,
            authorization_id,
            authorization_timestamp,
        };
        Ok((buffer, snapshot))
    }

    /// SHA-256 over the full buffer, truncated to the curve field size.
    fn truncated_digest(&self, buffer: &CryptoBuffer) -> Vec<u8> {
        sha256(buffer.as_bytes())[..self.engine.digest_length()].to_vec()
    }

    /// Verify one measurement value against the key store.
    ///
    /// Returns `None` when the value carries no signature; otherwise a
    /// `CryptoResult` with a terminal status; this never errors.
    pub fn verify_measurement(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
        store: &dyn MeterKeyStore,
    ) -> Option<CryptoResult> {
        let signature = value.signatures.first()?.clone();
        Some(self.verify_value(measurement, value, authorization, signature, store))
    }

    fn verify_value(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
        signature: EccSignature,
        store: &dyn MeterKeyStore,
    ) -> CryptoResult {
        let (buffer, snapshot) = match self.encode_record(measurement, value, authorization) {
            Ok(encoded) => encoded,
            Err(err) => {
                debug!(meter = %measurement.energy_meter_id, %err, "record encoding failed");
                return CryptoResult::unknown_format(signature);
            }
        };

        let digest = self.truncated_digest(&buffer);
        let mut result = CryptoResult {
            status: VerificationStatus::InvalidSignature,
            digest: Some(hex::encode(&digest)),
            snapshot: Some(snapshot),
            public_key: None,
            public_key_format: None,
            signature: Some(signature.clone()),
        };

        let Some(meter) = store.lookup(&measurement.energy_meter_id) else {
            result.status = VerificationStatus::EnergyMeterNotFound;
            return result;
        };
        let Some(public_key) = meter.public_keys.first() else {
            result.status = VerificationStatus::PublicKeyNotFound;
            return result;
        };

        let key_hex = public_key.value.to_lowercase();
        result.public_key = Some(key_hex.clone());
        result.public_key_format = Some(public_key.format.clone());

        let parsed = match self.engine.parse_public_key(&key_hex) {
            Ok(parsed) => parsed,
            Err(_) => {
                result.status = VerificationStatus::InvalidPublicKey;
                return result;
            }
        };

        result.status = if self.engine.verify(&parsed, &digest, &signature) {
            VerificationStatus::ValidSignature
        } else {
            VerificationStatus::InvalidSignature
        };
        result
    }

    /// Sign one measurement value with a caller-supplied private key.
    ///
    /// Signing is unconditional production: on success the result's
    /// status is `ValidSignature` by convention. The signature wire
    /// format follows the measurement's `signature_info`.
    pub fn sign_measurement(
        &self,
        measurement: &Measurement,
        value: &MeasurementValue,
        authorization: &AuthorizationStart,
        private_key_hex: &str,
        public_key_hex: Option<&str>,
    ) -> Result<CryptoResult, SignError> {
        let (buffer, snapshot) = self.encode_record(measurement, value, authorization)?;
        let digest = self.truncated_digest(&buffer);
        let signature = self.engine.sign(
            private_key_hex,
            &digest,
            &measurement.signature_info.algorithm,
            measurement.signature_info.format,
        )?;

        Ok(CryptoResult {
            status: VerificationStatus::ValidSignature,
            digest: Some(hex::encode(&digest)),
            snapshot: Some(snapshot),
            public_key: public_key_hex.map(str::to_lowercase),
            public_key_format: None,
            signature: Some(signature),
        })
    }
}
