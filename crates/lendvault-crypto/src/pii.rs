//! Per-recipient PII envelopes.
//!
//! Structured data is serialized to canonical JSON and sealed separately for
//! every recipient, so no two lenders ever share a content key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canonical::to_canonical_string;
use crate::envelope::{decrypt, encrypt};
use crate::error::CryptoError;

/// PII sealed for one recipient. `payload` is the envelope JSON as a string,
/// which is what the transport expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiEnvelope {
    #[serde(rename = "recipientId")]
    pub recipient_id: String,
    pub payload: String,
}

/// A recipient and the public key PII should be sealed under.
#[derive(Debug, Clone)]
pub struct RecipientKey {
    pub recipient_id: String,
    pub public_key_pem: String,
}

impl RecipientKey {
    pub fn new(recipient_id: impl Into<String>, public_key_pem: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            public_key_pem: public_key_pem.into(),
        }
    }
}

/// Sealing failed for one recipient in a multi-recipient call.
#[derive(Debug, Error)]
#[error("Encrypting PII for recipient {recipient_id} failed: {source}")]
pub struct RecipientFailure {
    pub recipient_id: String,
    #[source]
    pub source: CryptoError,
}

/// Seal `data` for a single recipient.
pub fn encrypt_pii_for_recipient<T: Serialize + ?Sized>(
    recipient_id: &str,
    public_key_pem: &str,
    data: &T,
) -> Result<PiiEnvelope, CryptoError> {
    let canonical = to_canonical_string(data)?;
    let envelope = encrypt(canonical.as_bytes(), public_key_pem)?;
    Ok(PiiEnvelope {
        recipient_id: recipient_id.to_string(),
        payload: envelope.to_json()?,
    })
}

/// Seal `data` for each recipient independently.
///
/// Results are returned in input order. A bad key for one recipient yields a
/// [`RecipientFailure`] in that slot and does not affect the others.
pub fn encrypt_pii_for_recipients<T: Serialize + ?Sized>(
    recipients: &[RecipientKey],
    data: &T,
) -> Vec<Result<PiiEnvelope, RecipientFailure>> {
    let results: Vec<_> = recipients
        .iter()
        .map(|r| {
            encrypt_pii_for_recipient(&r.recipient_id, &r.public_key_pem, data).map_err(|source| {
                tracing::warn!(
                    recipient_id = %r.recipient_id,
                    error = %source,
                    "failed to encrypt PII for recipient"
                );
                RecipientFailure {
                    recipient_id: r.recipient_id.clone(),
                    source,
                }
            })
        })
        .collect();

    tracing::debug!(
        recipients = recipients.len(),
        sealed = results.iter().filter(|r| r.is_ok()).count(),
        "encrypted PII for recipients"
    );
    results
}

/// Open a PII envelope with the recipient's private key.
pub fn decrypt_pii<T: DeserializeOwned>(
    envelope: &PiiEnvelope,
    private_key_pem: &str,
) -> Result<T, CryptoError> {
    let plaintext = decrypt(&envelope.payload, private_key_pem)?;
    serde_json::from_slice(&plaintext).map_err(|e| CryptoError::SerializationError(e.to_string()))
}
