use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Missing webhook signature header")]
    MissingSignature,

    #[error("Malformed webhook signature header: {0}")]
    MalformedSignature(String),

    #[error("Webhook timestamp {timestamp} is outside the {tolerance_secs}s tolerance (now {now})")]
    TimestampOutOfTolerance {
        timestamp: i64,
        now: i64,
        tolerance_secs: u64,
    },

    #[error("Webhook signature does not match payload")]
    SignatureMismatch,

    #[error("Webhook payload is not a valid event: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    /// The request must not be trusted: the signature is missing, unparsable,
    /// stale, or wrong. Callers usually answer all of these the same way.
    pub fn is_signature_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingSignature
                | Self::MalformedSignature(_)
                | Self::TimestampOutOfTolerance { .. }
                | Self::SignatureMismatch
        )
    }
}
