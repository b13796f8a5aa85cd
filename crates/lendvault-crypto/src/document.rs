//! Binary document packing for the secure document exchange (SDX).
//!
//! Wire format:
//! [4 bytes: metadata length L (u32 BE)][L bytes: metadata JSON][ciphertext]
//!
//! Metadata is `{"encryptedKey","iv","authTag"}`. There is no checksum field;
//! the GCM tag authenticates the ciphertext.

use serde::{Deserialize, Serialize};

use crate::base64::{base64_encode, decode_field, decode_fixed};
use crate::envelope::{open_raw, seal_raw, Envelope, RawEnvelope};
use crate::error::CryptoError;
use crate::keys::{parse_private_key_pem, parse_public_key_pem};
use crate::types::PACKED_LENGTH_PREFIX;

/// Key material needed to open a packed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(rename = "encryptedKey")]
    pub encrypted_key: String,
    pub iv: String,
    #[serde(rename = "authTag")]
    pub auth_tag: String,
}

/// An encrypted document split into its metadata and ciphertext sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedDocument {
    metadata: DocumentMetadata,
    ciphertext: Vec<u8>,
}

impl PackedDocument {
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// GCM ciphertext, without the tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Serialize to the upload format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        let metadata = serde_json::to_vec(&self.metadata)
            .map_err(|e| CryptoError::SerializationError(e.to_string()))?;
        let length = u32::try_from(metadata.len()).map_err(|_| {
            CryptoError::SerializationError(format!(
                "metadata of {} bytes exceeds u32 length prefix",
                metadata.len()
            ))
        })?;

        let mut out =
            Vec::with_capacity(PACKED_LENGTH_PREFIX + metadata.len() + self.ciphertext.len());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&metadata);
        out.extend_from_slice(&self.ciphertext);
        Ok(out)
    }

    /// Split a packed byte sequence into its sections.
    ///
    /// Validates the length prefix and that the metadata carries the three
    /// required string fields. Does not decrypt.
    pub fn parse(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < PACKED_LENGTH_PREFIX {
            return Err(CryptoError::InvalidPackedDocument(format!(
                "expected at least {} bytes, got {}",
                PACKED_LENGTH_PREFIX,
                bytes.len()
            )));
        }
        let mut prefix = [0u8; PACKED_LENGTH_PREFIX];
        prefix.copy_from_slice(&bytes[..PACKED_LENGTH_PREFIX]);
        let metadata_len = u32::from_be_bytes(prefix) as usize;

        let metadata_end = PACKED_LENGTH_PREFIX
            .checked_add(metadata_len)
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| {
                CryptoError::InvalidPackedDocument(format!(
                    "metadata length {} exceeds remaining {} bytes",
                    metadata_len,
                    bytes.len() - PACKED_LENGTH_PREFIX
                ))
            })?;

        let metadata: DocumentMetadata =
            serde_json::from_slice(&bytes[PACKED_LENGTH_PREFIX..metadata_end])
                .map_err(|e| CryptoError::InvalidPackedDocument(format!("metadata: {}", e)))?;

        Ok(Self {
            metadata,
            ciphertext: bytes[metadata_end..].to_vec(),
        })
    }

    /// View as an [`Envelope`] so it can be opened with the same primitives.
    pub fn to_envelope(&self) -> Envelope {
        Envelope {
            encrypted_data: base64_encode(&self.ciphertext),
            encrypted_key: self.metadata.encrypted_key.clone(),
            iv: self.metadata.iv.clone(),
            auth_tag: self.metadata.auth_tag.clone(),
        }
    }
}

/// Encrypt raw document bytes for `recipient_public_key_pem`.
pub fn pack(
    document: &[u8],
    recipient_public_key_pem: &str,
) -> Result<PackedDocument, CryptoError> {
    let public_key = parse_public_key_pem(recipient_public_key_pem)?;
    let raw = seal_raw(document, &public_key)?;
    tracing::debug!(
        document_bytes = document.len(),
        "packed document for upload"
    );
    Ok(PackedDocument {
        metadata: DocumentMetadata {
            encrypted_key: base64_encode(&raw.wrapped_key),
            iv: base64_encode(&raw.iv),
            auth_tag: base64_encode(&raw.tag),
        },
        ciphertext: raw.ciphertext,
    })
}

/// Parse and decrypt a downloaded packed document.
pub fn unpack(bytes: &[u8], recipient_private_key_pem: &str) -> Result<Vec<u8>, CryptoError> {
    let PackedDocument {
        metadata,
        ciphertext,
    } = PackedDocument::parse(bytes)?;
    let raw = RawEnvelope {
        ciphertext,
        wrapped_key: decode_field("encryptedKey", &metadata.encrypted_key)?,
        iv: decode_fixed("iv", &metadata.iv)?,
        tag: decode_fixed("authTag", &metadata.auth_tag)?,
    };
    let private_key = parse_private_key_pem(recipient_private_key_pem)?;
    open_raw(&raw, &private_key)
}
