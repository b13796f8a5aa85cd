use thiserror::Error;

/// Broad failure class of a [`CryptoError`].
///
/// Structural errors mean the input was malformed; cryptographic errors mean
/// the input was well formed but keys or authentication did not line up.
/// Neither is worth retrying with the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    Cryptographic,
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Invalid base64 in {field}: {reason}")]
    Base64Decode { field: &'static str, reason: String },

    #[error("Invalid {field} length: expected {expected} bytes, got {got}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invalid packed document: {0}")]
    InvalidPackedDocument(String),

    #[error("Invalid RSA public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RSA-OAEP key wrap failed: {0}")]
    WrapFailed(String),

    #[error("RSA-OAEP key unwrap failed: {0}")]
    UnwrapFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("canonicalJSON: non-finite number is not representable in JSON")]
    NonFiniteNumber,

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEnvelope(_)
            | Self::Base64Decode { .. }
            | Self::InvalidFieldLength { .. }
            | Self::InvalidPackedDocument(_)
            | Self::InvalidPublicKey(_)
            | Self::InvalidPrivateKey(_)
            | Self::SerializationError(_)
            | Self::NonFiniteNumber => ErrorKind::Structural,
            Self::WrapFailed(_)
            | Self::UnwrapFailed(_)
            | Self::EncryptionFailed(_)
            | Self::DecryptionFailed(_)
            | Self::RngFailed(_) => ErrorKind::Cryptographic,
        }
    }
}
