//! Neobank ↔ lender round trip: PII out, offers back.

use lendvault_crypto::testing::{fixture_keypair, other_keypair};
use lendvault_crypto::{
    decrypt_pii, encrypt, encrypt_pii_for_recipients, sha256_hex, RecipientKey,
};
use lendvault_offers::{verify_offers, EncryptedOffer};
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

/// Lender side: read the applicant, answer with an encrypted offer.
fn lender_responds(
    pii_payload: &lendvault_crypto::PiiEnvelope,
    lender_private_pem: &str,
    neobank_public_pem: &str,
    offer_id: &str,
) -> EncryptedOffer {
    let applicant: Value = decrypt_pii(pii_payload, lender_private_pem).unwrap();
    let offer = json!({
        "offerId": offer_id,
        "lenderId": pii_payload.recipient_id,
        "applicationId": applicant["applicationId"],
        "amount": 15000.0,
        "termMonths": 24,
        "x-lender-score": 712
    });
    let payload = encrypt(&serde_json::to_vec(&offer).unwrap(), neobank_public_pem)
        .unwrap()
        .to_json()
        .unwrap();
    EncryptedOffer {
        expected_checksum: sha256_hex(payload.as_bytes()),
        encrypted_payload: payload,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn pii_to_offers_round_trip() {
    let neobank = fixture_keypair();
    let lender = other_keypair();

    let applicant = json!({"applicationId": "app_1", "ssn": "123-45-6789"});
    let sealed = encrypt_pii_for_recipients(
        &[
            RecipientKey::new("lender-a", lender.public_pem),
            RecipientKey::new("lender-b", lender.public_pem),
        ],
        &applicant,
    );

    let offers: Vec<EncryptedOffer> = sealed
        .iter()
        .enumerate()
        .map(|(i, env)| {
            lender_responds(
                env.as_ref().unwrap(),
                lender.private_pem,
                neobank.public_pem,
                &format!("off_{i}"),
            )
        })
        .collect();

    let results = verify_offers(offers, neobank.private_pem);
    assert_eq!(results.len(), 2);
    for (i, result) in results.iter().enumerate() {
        assert!(result.verified, "offer {i} should verify");
        let details = result.details.as_ref().unwrap();
        assert_eq!(details.offer_id.as_deref(), Some(format!("off_{i}").as_str()));
        assert_eq!(details.application_id.as_deref(), Some("app_1"));
        assert_eq!(details.additional_fields["x-lender-score"], json!(712));
    }
}

#[test]
fn corrupted_transport_flips_verified_only() {
    let neobank = fixture_keypair();
    let mut offer = lender_responds(
        &lendvault_crypto::encrypt_pii_for_recipient(
            "lender-a",
            other_keypair().public_pem,
            &json!({"applicationId": "app_2"}),
        )
        .unwrap(),
        other_keypair().private_pem,
        neobank.public_pem,
        "off_9",
    );

    // Re-serialized with whitespace: same envelope, different bytes on the wire
    let reformatted: Value = serde_json::from_str(&offer.encrypted_payload).unwrap();
    offer.encrypted_payload = serde_json::to_string_pretty(&reformatted).unwrap();

    let results = verify_offers(vec![offer], neobank.private_pem);
    assert!(!results[0].verified);
    assert!(results[0].error.is_none());
    assert!(results[0].details.is_some());
}

#[test]
fn offers_for_someone_else_fail_per_item() {
    let neobank = fixture_keypair();
    let stranger = other_keypair();

    let for_neobank = encrypt(br#"{"offerId":"mine"}"#, neobank.public_pem)
        .unwrap()
        .to_json()
        .unwrap();
    let for_stranger = encrypt(br#"{"offerId":"theirs"}"#, stranger.public_pem)
        .unwrap()
        .to_json()
        .unwrap();

    let offers = vec![
        EncryptedOffer {
            expected_checksum: sha256_hex(for_stranger.as_bytes()),
            encrypted_payload: for_stranger,
        },
        EncryptedOffer {
            expected_checksum: sha256_hex(for_neobank.as_bytes()),
            encrypted_payload: for_neobank,
        },
    ];

    let results = verify_offers(offers, neobank.private_pem);
    assert!(results[0].error.is_some());
    assert!(results[0].details.is_none());
    assert!(!results[0].verified);
    assert!(results[1].verified);
    assert_eq!(
        results[1].details.as_ref().unwrap().offer_id.as_deref(),
        Some("mine")
    );
}
