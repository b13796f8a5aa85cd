//! Secure document exchange (SDX) upload flow.
//!
//! The document is packed exactly once. Only the network steps run under the
//! executor; a packing failure is returned immediately. The upload token is
//! cached across attempts and dropped when the server reports it expired, so
//! the next attempt fetches a fresh one.

use async_trait::async_trait;
use parking_lot::Mutex;

use lendvault_crypto::pack;

use crate::error::ExchangeError;
use crate::executor::ResilientExecutor;

/// Short-lived credential authorizing one document upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadToken {
    pub token: String,
    pub upload_url: String,
}

/// Network side of the document exchange.
#[async_trait]
pub trait DocumentExchange: Send + Sync {
    async fn fetch_upload_token(&self) -> Result<UploadToken, ExchangeError>;

    /// Upload packed bytes. Returns the remote document id.
    async fn upload(&self, token: &UploadToken, packed: &[u8]) -> Result<String, ExchangeError>;
}

/// Pack `document` for the recipient and upload it, retrying per `executor`.
pub async fn upload_document<X>(
    exchange: &X,
    executor: &ResilientExecutor,
    document: &[u8],
    recipient_public_key_pem: &str,
) -> Result<String, ExchangeError>
where
    X: DocumentExchange + ?Sized,
{
    let packed = pack(document, recipient_public_key_pem)?.to_bytes()?;
    let cached = Mutex::new(None);

    let document_id = executor
        .execute(|| attempt_upload(exchange, &cached, &packed))
        .await?;

    tracing::debug!(
        packed_bytes = packed.len(),
        document_id = %document_id,
        "uploaded document"
    );
    Ok(document_id)
}

async fn attempt_upload<X>(
    exchange: &X,
    cached: &Mutex<Option<UploadToken>>,
    packed: &[u8],
) -> Result<String, ExchangeError>
where
    X: DocumentExchange + ?Sized,
{
    let existing = cached.lock().clone();
    let token = match existing {
        Some(token) => token,
        None => {
            let token = exchange.fetch_upload_token().await?;
            *cached.lock() = Some(token.clone());
            token
        }
    };

    match exchange.upload(&token, packed).await {
        Err(ExchangeError::TokenExpired) => {
            tracing::debug!("upload token expired, discarding");
            cached.lock().take();
            Err(ExchangeError::TokenExpired)
        }
        other => other,
    }
}
