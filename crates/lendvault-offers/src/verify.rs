//! Offer integrity verification.
//!
//! The checksum is taken over the encrypted payload string exactly as
//! received, before any decryption. It detects corruption of the blob the
//! lender produced; it says nothing about the decrypted content, which is
//! authenticated separately by the envelope's GCM tag.

use lendvault_crypto::{decrypt, sha256_hex};

use crate::error::OfferError;
use crate::types::{BatchVerification, DecryptedOffer, EncryptedOfferRecord, OfferVerification};

/// Open one encrypted offer and check it against the lender's checksum.
///
/// Decryption or parse failures are errors; a checksum mismatch is not and
/// shows up as `verified: false`.
pub fn verify_offer(
    encrypted_payload: &str,
    expected_checksum: &str,
    private_key_pem: &str,
) -> Result<OfferVerification, OfferError> {
    let checksum = sha256_hex(encrypted_payload.as_bytes());

    let plaintext = match decrypt(encrypted_payload, private_key_pem) {
        Ok(plaintext) => plaintext,
        Err(source) => return Err(OfferError::Decryption { checksum, source }),
    };

    let data: DecryptedOffer = match serde_json::from_slice(&plaintext) {
        Ok(data) => data,
        Err(source) => return Err(OfferError::InvalidOffer { checksum, source }),
    };

    let verified = checksum == expected_checksum;
    if !verified {
        tracing::debug!(
            offer_id = data.offer_id.as_deref().unwrap_or(""),
            "offer checksum does not match lender assertion"
        );
    }

    Ok(OfferVerification {
        data,
        checksum,
        verified,
    })
}

/// Verify every offer independently, preserving input order.
///
/// A record that fails to open becomes an entry with `details: None`,
/// `verified: false` and the error message; its siblings are unaffected.
pub fn verify_offers<T: EncryptedOfferRecord>(
    offers: Vec<T>,
    private_key_pem: &str,
) -> Vec<BatchVerification<T>> {
    let total = offers.len();
    let results: Vec<BatchVerification<T>> = offers
        .into_iter()
        .enumerate()
        .map(|(index, offer)| {
            match verify_offer(
                offer.encrypted_payload(),
                offer.expected_checksum(),
                private_key_pem,
            ) {
                Ok(OfferVerification {
                    data,
                    checksum,
                    verified,
                }) => BatchVerification {
                    offer,
                    details: Some(data),
                    checksum,
                    verified,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(index, error = %e, "failed to verify offer in batch");
                    BatchVerification {
                        checksum: e.checksum().to_string(),
                        offer,
                        details: None,
                        verified: false,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    tracing::debug!(
        total,
        verified = results.iter().filter(|r| r.verified).count(),
        failed = results.iter().filter(|r| r.error.is_some()).count(),
        "verified offer batch"
    );
    results
}
