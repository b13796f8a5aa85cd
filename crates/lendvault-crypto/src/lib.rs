//! Envelope cryptography for neobank ↔ lender data exchange.
//!
//! - Hybrid RSA-OAEP / AES-256-GCM envelopes, one per recipient
//! - Canonical-JSON PII envelopes
//! - Length-prefixed packed documents for the secure document exchange
//! - SHA-256 checksums and constant-time comparison
//!
//! All operations are stateless; keys are supplied as PEM on every call.

pub mod base64;
pub mod canonical;
pub mod checksum;
pub mod ct;
pub mod document;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod pii;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod types;

pub use base64::{base64_decode, base64_encode};
pub use canonical::{canonical_json, to_canonical_string};
pub use checksum::{sha256_hex, verify_checksum};
pub use ct::constant_time_eq;
pub use document::{pack, unpack, DocumentMetadata, PackedDocument};
pub use envelope::{decrypt, encrypt, Envelope};
pub use error::{CryptoError, ErrorKind};
pub use keys::{parse_private_key_pem, parse_public_key_pem};
pub use pii::{
    decrypt_pii, encrypt_pii_for_recipient, encrypt_pii_for_recipients, PiiEnvelope,
    RecipientFailure, RecipientKey,
};
pub use types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, PACKED_LENGTH_PREFIX};
