//! # Integration Test Flows
//!
//! End-to-end flows through the public service API: sign a measurement
//! value with one crate, verify it through another, and check that the
//! session verdict folds as documented.

#[cfg(test)]
mod tests {
    use ct_verification::{
        AggregationMode, InMemoryMeterStore, MeasurementVerificationApi, VerificationService,
    };
    use shared_types::{
        AuthorizationStart, ChargingSession, Measurement, MeasurementValue, Meter,
        MeterPublicKey, SessionStatus, SignatureFormat, SignatureInfo, VerificationStatus,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn p192_keypair() -> (String, String) {
        shared_crypto::ecdsa::test_helpers::generate_keypair(shared_crypto::EcdsaCurve::NistP192)
    }

    fn p256_keypair() -> (String, String) {
        shared_crypto::ecdsa::test_helpers::generate_keypair(shared_crypto::EcdsaCurve::NistP256)
    }

    /// An EMH-style measurement: P-192 curve, raw (r, s) signatures and
    /// the extended status fields in every value.
    fn emh_measurement() -> Measurement {
        Measurement {
            energy_meter_id: "1EMH0008".into(),
            obis: "1-1:1.8.0".into(),
            unit_encoded: 30,
            scale: -1,
            signature_info: SignatureInfo {
                algorithm: "ECC secp192r1".into(),
                format: SignatureFormat::Rs,
            },
            values: Vec::new(),
        }
    }

    fn emh_value(timestamp: i64, raw: u64) -> MeasurementValue {
        MeasurementValue {
            timestamp,
            value: raw,
            info_status: Some("08".into()),
            seconds_index: Some(12_345),
            pagination_id: Some("0000cf28".into()),
            log_book_index: Some("0006".into()),
            signatures: Vec::new(),
        }
    }

    fn authorization() -> AuthorizationStart {
        AuthorizationStart {
            id: "71234ABC".into(),
            timestamp: 1_551_435_490,
        }
    }

    fn meter(id: &str, public_key_hex: &str) -> Meter {
        Meter {
            id: id.into(),
            public_keys: vec![MeterPublicKey {
                value: public_key_hex.into(),
                format: "plain".into(),
            }],
        }
    }

    /// Sign `count` values for a measurement, attaching the signatures.
    fn sign_values(
        service: &VerificationService<InMemoryMeterStore>,
        measurement: &mut Measurement,
        private_key_hex: &str,
        count: usize,
    ) {
        for i in 0..count {
            let mut value = emh_value(1_551_435_500 + i as i64 * 60, 2935 + i as u64 * 100);
            let signed = service
                .sign_measurement(
                    measurement,
                    &value,
                    &authorization(),
                    private_key_hex,
                    None,
                )
                .unwrap();
            value.signatures = vec![signed.signature.unwrap()];
            measurement.values.push(value);
        }
    }

    // =============================================================================
    // SIGN → VERIFY ROUND TRIPS
    // =============================================================================

    #[test]
    fn test_p192_rs_sign_and_verify_round_trip() {
        let (sk, pk) = p192_keypair();
        let service =
            VerificationService::new(InMemoryMeterStore::from_meters([meter("1EMH0008", &pk)]));

        let measurement = emh_measurement();
        let mut value = emh_value(1_551_435_500, 2935);
        let signed = service
            .sign_measurement(&measurement, &value, &authorization(), &sk, Some(&pk))
            .unwrap();

        // P-192 digests are truncated to 24 bytes.
        assert_eq!(signed.digest.as_deref().unwrap().len(), 48);
        let signature = signed.signature.clone().unwrap();
        assert!(signature.r.is_some() && signature.s.is_some());

        value.signatures = vec![signature];
        let result = service
            .verify_measurement(&measurement, &value, &authorization())
            .unwrap();
        assert_eq!(result.status, VerificationStatus::ValidSignature);
        assert_eq!(result.digest, signed.digest);

        let snapshot = result.snapshot.unwrap();
        assert_eq!(snapshot.meter_id, "1EMH0008");
        assert_eq!(snapshot.obis, "0101010800ff");
        assert_eq!(snapshot.value, "2935");
        assert_eq!(snapshot.scale, "-1");
    }

    #[test]
    fn test_p256_der_sign_and_verify_round_trip() {
        let (sk, pk) = p256_keypair();
        let service =
            VerificationService::new(InMemoryMeterStore::from_meters([meter("0901454d", &pk)]));

        let measurement = Measurement {
            energy_meter_id: "0901454d".into(),
            obis: "0100011100ff".into(),
            unit_encoded: 30,
            scale: 0,
            signature_info: SignatureInfo {
                algorithm: "ECC secp256r1".into(),
                format: SignatureFormat::Der,
            },
            values: Vec::new(),
        };
        let mut value = MeasurementValue {
            timestamp: 1_551_435_600,
            value: 11_200,
            info_status: None,
            seconds_index: None,
            pagination_id: None,
            log_book_index: None,
            signatures: Vec::new(),
        };

        let signed = service
            .sign_measurement(&measurement, &value, &authorization(), &sk, Some(&pk))
            .unwrap();
        assert_eq!(signed.digest.as_deref().unwrap().len(), 64);
        assert!(signed.signature.as_ref().unwrap().value.is_some());

        value.signatures = vec![signed.signature.unwrap()];
        let result = service
            .verify_measurement(&measurement, &value, &authorization())
            .unwrap();
        assert_eq!(result.status, VerificationStatus::ValidSignature);
    }

    #[test]
    fn test_key_substitution_detected() {
        let (sk, _pk) = p192_keypair();
        let (_, other_pk) = p192_keypair();
        // The store carries a different meter's key.
        let service = VerificationService::new(InMemoryMeterStore::from_meters([meter(
            "1EMH0008", &other_pk,
        )]));

        let measurement = emh_measurement();
        let mut value = emh_value(1_551_435_500, 2935);
        let signed = service
            .sign_measurement(&measurement, &value, &authorization(), &sk, None)
            .unwrap();
        value.signatures = vec![signed.signature.unwrap()];

        let result = service
            .verify_measurement(&measurement, &value, &authorization())
            .unwrap();
        assert_eq!(result.status, VerificationStatus::InvalidSignature);
    }

    #[test]
    fn test_tampered_reading_detected() {
        let (sk, pk) = p192_keypair();
        let service =
            VerificationService::new(InMemoryMeterStore::from_meters([meter("1EMH0008", &pk)]));

        let measurement = emh_measurement();
        let mut value = emh_value(1_551_435_500, 2935);
        let signed = service
            .sign_measurement(&measurement, &value, &authorization(), &sk, None)
            .unwrap();
        value.signatures = vec![signed.signature.unwrap()];
        value.value = 2934; // one deciwatt-hour less than signed

        let result = service
            .verify_measurement(&measurement, &value, &authorization())
            .unwrap();
        assert_eq!(result.status, VerificationStatus::InvalidSignature);
    }

    // =============================================================================
    // SESSION-LEVEL FLOWS
    // =============================================================================

    #[test]
    fn test_session_all_valid() {
        crate::init_tracing();
        let (sk, pk) = p192_keypair();
        let service =
            VerificationService::new(InMemoryMeterStore::from_meters([meter("1EMH0008", &pk)]));

        let mut measurement = emh_measurement();
        sign_values(&service, &mut measurement, &sk, 3);

        let session = ChargingSession {
            id: "session-1".into(),
            authorization_start: authorization(),
            measurements: vec![measurement],
        };
        let report = service.verify_session(&session);
        assert_eq!(report.status, SessionStatus::ValidSignature);
        assert_eq!(report.measurements[0].values.len(), 3);
    }

    #[test]
    fn test_session_verdict_sticks_across_measurements() {
        let (sk_a, pk_a) = p192_keypair();
        let (sk_b, pk_b) = p192_keypair();
        let store = InMemoryMeterStore::from_meters([
            meter("1EMH0008", &pk_a),
            meter("1EMH0009", &pk_b),
        ]);
        let service = VerificationService::new(store);

        let mut bad = emh_measurement();
        sign_values(&service, &mut bad, &sk_a, 2);
        bad.values[0].value += 1; // tamper after signing

        let mut good = emh_measurement();
        good.energy_meter_id = "1EMH0009".into();
        sign_values(&service, &mut good, &sk_b, 2);

        let session = ChargingSession {
            id: "session-2".into(),
            authorization_start: authorization(),
            measurements: vec![bad, good],
        };

        let report = service.verify_session(&session);
        assert_eq!(report.status, SessionStatus::InvalidSignature);

        // The legacy fold lets the later measurement overwrite it.
        let compat_service = VerificationService::new(InMemoryMeterStore::from_meters([
            meter("1EMH0008", &pk_a),
            meter("1EMH0009", &pk_b),
        ]))
        .with_aggregation(AggregationMode::PerMeasurementCompat);
        let compat = compat_service.verify_session(&session);
        assert_eq!(compat.status, SessionStatus::ValidSignature);
    }

    #[test]
    fn test_session_with_unregistered_meter() {
        let (sk, pk) = p192_keypair();
        let signing_service =
            VerificationService::new(InMemoryMeterStore::from_meters([meter("1EMH0008", &pk)]));
        let mut measurement = emh_measurement();
        sign_values(&signing_service, &mut measurement, &sk, 2);

        // Verify against an empty store.
        let service = VerificationService::new(InMemoryMeterStore::new());
        let session = ChargingSession {
            id: "session-3".into(),
            authorization_start: authorization(),
            measurements: vec![measurement],
        };
        let report = service.verify_session(&session);

        assert_eq!(report.status, SessionStatus::InvalidSignature);
        assert!(report.measurements[0].values.iter().all(|outcome| {
            outcome.as_ref().unwrap().status == VerificationStatus::EnergyMeterNotFound
        }));
    }
}
