//! # Session Document Flows
//!
//! Charge transparency documents arrive as JSON. These tests parse a
//! session document, verify it, and check that the report itself
//! serializes for downstream display.

#[cfg(test)]
mod tests {
    use ct_verification::{
        InMemoryMeterStore, MeasurementVerificationApi, SessionReport, VerificationService,
    };
    use shared_types::{
        ChargingSession, Meter, MeterPublicKey, SessionStatus, VerificationStatus,
    };

    fn p192_keypair() -> (String, String) {
        shared_crypto::ecdsa::test_helpers::generate_keypair(shared_crypto::EcdsaCurve::NistP192)
    }

    /// A minimal session document in the shape embedders hand over.
    fn session_document() -> &'static str {
        r#"{
            "id": "DE*GEF*E12345678*1",
            "authorization_start": {
                "id": "71234ABC",
                "timestamp": 1551435490
            },
            "measurements": [
                {
                    "energy_meter_id": "1EMH0008",
                    "obis": "1-1:1.8.0",
                    "unit_encoded": 30,
                    "scale": -1,
                    "signature_info": {
                        "algorithm": "ECC secp192r1",
                        "format": "Rs"
                    },
                    "values": [
                        {
                            "timestamp": 1551435500,
                            "value": 2935,
                            "info_status": "08",
                            "seconds_index": 12345,
                            "pagination_id": "0000cf28",
                            "log_book_index": "0006",
                            "signatures": []
                        },
                        {
                            "timestamp": 1551435560,
                            "value": 3035,
                            "info_status": "08",
                            "seconds_index": 12405,
                            "pagination_id": "0000cf29",
                            "log_book_index": "0006",
                            "signatures": []
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn test_parse_sign_verify_document() {
        let mut session: ChargingSession = serde_json::from_str(session_document()).unwrap();
        assert_eq!(session.measurements[0].values.len(), 2);

        let (sk, pk) = p192_keypair();
        let service = VerificationService::new(InMemoryMeterStore::from_meters([Meter {
            id: "1EMH0008".into(),
            public_keys: vec![MeterPublicKey {
                value: pk,
                format: "plain".into(),
            }],
        }]));

        // Sign the parsed values in place of the meter firmware.
        let authorization = session.authorization_start.clone();
        let measurement = session.measurements[0].clone();
        for value in &mut session.measurements[0].values {
            let signed = service
                .sign_measurement(&measurement, value, &authorization, &sk, None)
                .unwrap();
            value.signatures = vec![signed.signature.unwrap()];
        }

        let report = service.verify_session(&session);
        assert_eq!(report.status, SessionStatus::ValidSignature);
        assert!(report.measurements[0].qualified);
        assert!(report.measurements[0].values.iter().all(|outcome| {
            outcome.as_ref().unwrap().status == VerificationStatus::ValidSignature
        }));
    }

    #[test]
    fn test_unsigned_document_values_are_unverifiable() {
        let session: ChargingSession = serde_json::from_str(session_document()).unwrap();
        let service = VerificationService::new(InMemoryMeterStore::new());

        let report = service.verify_session(&session);
        // Qualifying measurement with unverifiable values downgrades.
        assert_eq!(report.status, SessionStatus::InvalidSignature);
        assert!(report.measurements[0]
            .values
            .iter()
            .all(|outcome| outcome.is_none()));
    }

    #[test]
    fn test_report_serializes_for_display() {
        let session: ChargingSession = serde_json::from_str(session_document()).unwrap();
        let service = VerificationService::new(InMemoryMeterStore::new());
        let report = service.verify_session(&session);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: SessionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
