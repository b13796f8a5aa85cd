use lendvault_crypto::CryptoError;
use thiserror::Error;

use crate::executor::Retryable;

/// Failures of the secure document exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The upload token was refused as expired. A fresh one must be fetched.
    #[error("Upload token expired")]
    TokenExpired,

    /// Network or server hiccup worth trying again.
    #[error("Transient exchange failure: {0}")]
    Transient(String),

    /// The remote side refused the request for good.
    #[error("Exchange rejected request: {0}")]
    Rejected(String),

    /// Packing the document failed. Never retried.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl Retryable for ExchangeError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::TokenExpired | Self::Transient(_))
    }
}
