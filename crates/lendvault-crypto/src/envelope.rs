//! Hybrid per-recipient envelope encryption.
//!
//! - Content encryption: AES-256-GCM with a fresh 256-bit key and 96-bit IV per call
//! - Key wrapping: RSA-OAEP with SHA-256 for both the OAEP hash and MGF1
//!
//! Wire format (JSON, all fields standard base64):
//! `{"encryptedData": .., "encryptedKey": .., "iv": .., "authTag": ..}`
//!
//! The GCM tag is the only integrity check; the envelope carries no checksum
//! and no recipient identity.

use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::base64::{base64_encode, decode_field, decode_fixed};
use crate::error::CryptoError;
use crate::keys::{parse_private_key_pem, parse_public_key_pem};
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};

/// Hybrid-encryption container. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// AES-256-GCM ciphertext without the tag.
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
    /// One-time AES key wrapped with RSA-OAEP.
    #[serde(rename = "encryptedKey")]
    pub encrypted_key: String,
    /// 12-byte GCM nonce.
    pub iv: String,
    /// 16-byte GCM authentication tag.
    #[serde(rename = "authTag")]
    pub auth_tag: String,
}

/// Binary form of an [`Envelope`] after base64 decoding and length checks.
pub(crate) struct RawEnvelope {
    pub ciphertext: Vec<u8>,
    pub wrapped_key: Vec<u8>,
    pub iv: [u8; AES_GCM_IV_LENGTH],
    pub tag: [u8; AES_GCM_TAG_LENGTH],
}

impl Envelope {
    /// Parse an envelope from its JSON wire form.
    ///
    /// Fails if any of the four fields is missing or not a string. Unknown
    /// keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json).map_err(|e| CryptoError::InvalidEnvelope(e.to_string()))
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string(self).map_err(|e| CryptoError::SerializationError(e.to_string()))
    }

    /// Decode all fields, enforcing IV and tag lengths.
    pub(crate) fn decode(&self) -> Result<RawEnvelope, CryptoError> {
        Ok(RawEnvelope {
            ciphertext: decode_field("encryptedData", &self.encrypted_data)?,
            wrapped_key: decode_field("encryptedKey", &self.encrypted_key)?,
            iv: decode_fixed("iv", &self.iv)?,
            tag: decode_fixed("authTag", &self.auth_tag)?,
        })
    }

    /// Decrypt with the recipient's private key.
    pub fn open(&self, recipient_private_key_pem: &str) -> Result<Vec<u8>, CryptoError> {
        let private_key = parse_private_key_pem(recipient_private_key_pem)?;
        let raw = self.decode()?;
        open_raw(&raw, &private_key)
    }
}

/// Encrypt `plaintext` for the holder of `recipient_public_key_pem`.
///
/// Every call draws a new AES key and IV, so identical inputs never produce
/// identical envelopes.
pub fn encrypt(plaintext: &[u8], recipient_public_key_pem: &str) -> Result<Envelope, CryptoError> {
    let public_key = parse_public_key_pem(recipient_public_key_pem)?;
    let raw = seal_raw(plaintext, &public_key)?;
    Ok(Envelope {
        encrypted_data: base64_encode(&raw.ciphertext),
        encrypted_key: base64_encode(&raw.wrapped_key),
        iv: base64_encode(&raw.iv),
        auth_tag: base64_encode(&raw.tag),
    })
}

/// Decrypt an envelope given as JSON.
///
/// Structural problems (bad JSON, missing fields, bad base64, wrong IV/tag
/// length) fail before any key is touched. A wrong private key fails at the
/// RSA unwrap; a modified ciphertext, IV or tag fails at the GCM tag check.
pub fn decrypt(
    envelope_json: &str,
    recipient_private_key_pem: &str,
) -> Result<Vec<u8>, CryptoError> {
    let envelope = Envelope::from_json(envelope_json)?;
    let raw = envelope.decode()?;
    let private_key = parse_private_key_pem(recipient_private_key_pem)?;
    open_raw(&raw, &private_key)
}

/// AES-256-GCM encrypt under a fresh key, then wrap the key for `public_key`.
pub(crate) fn seal_raw(
    plaintext: &[u8],
    public_key: &RsaPublicKey,
) -> Result<RawEnvelope, CryptoError> {
    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    getrandom::getrandom(&mut key[..]).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    let mut iv = [0u8; AES_GCM_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;

    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| CryptoError::EncryptionFailed(format!("AES-GCM init: {}", e)))?;
    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(format!("AES-GCM encrypt: {}", e)))?;

    // aes-gcm appends the tag; the wire format carries it separately
    let tag_offset = sealed.len() - AES_GCM_TAG_LENGTH;
    let mut tag = [0u8; AES_GCM_TAG_LENGTH];
    tag.copy_from_slice(&sealed[tag_offset..]);
    sealed.truncate(tag_offset);

    let wrapped_key = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &key[..])
        .map_err(|e| CryptoError::WrapFailed(e.to_string()))?;

    Ok(RawEnvelope {
        ciphertext: sealed,
        wrapped_key,
        iv,
        tag,
    })
}

/// Unwrap the content key and open the GCM ciphertext.
pub(crate) fn open_raw(
    raw: &RawEnvelope,
    private_key: &RsaPrivateKey,
) -> Result<Vec<u8>, CryptoError> {
    let mut key = private_key
        .decrypt(Oaep::new::<Sha256>(), &raw.wrapped_key)
        .map_err(|e| CryptoError::UnwrapFailed(e.to_string()))?;
    if key.len() != AES_KEY_LENGTH {
        let got = key.len();
        key.zeroize();
        return Err(CryptoError::InvalidFieldLength {
            field: "content key",
            expected: AES_KEY_LENGTH,
            got,
        });
    }

    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CryptoError::DecryptionFailed(format!("AES-GCM init: {}", e)));
    key.zeroize();
    let cipher = cipher?;

    // aes-gcm expects ciphertext and tag together
    let mut ct_with_tag = Vec::with_capacity(raw.ciphertext.len() + AES_GCM_TAG_LENGTH);
    ct_with_tag.extend_from_slice(&raw.ciphertext);
    ct_with_tag.extend_from_slice(&raw.tag);

    cipher
        .decrypt(Nonce::from_slice(&raw.iv), ct_with_tag.as_slice())
        .map_err(|e| CryptoError::DecryptionFailed(format!("AES-GCM decrypt: {}", e)))
}
