use lendvault_crypto::CryptoError;
use thiserror::Error;

/// Failure to open a single offer.
///
/// A checksum mismatch is not an error; it is reported through
/// `verified: false`. Both variants still carry the checksum computed over
/// the received payload.
#[derive(Debug, Error)]
pub enum OfferError {
    #[error("Offer decryption failed: {source}")]
    Decryption {
        checksum: String,
        #[source]
        source: CryptoError,
    },

    #[error("Decrypted offer is not a valid offer object: {source}")]
    InvalidOffer {
        checksum: String,
        #[source]
        source: serde_json::Error,
    },
}

impl OfferError {
    /// SHA-256 of the encrypted payload as received.
    pub fn checksum(&self) -> &str {
        match self {
            Self::Decryption { checksum, .. } | Self::InvalidOffer { checksum, .. } => checksum,
        }
    }
}
