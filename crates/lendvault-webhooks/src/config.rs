use serde::Deserialize;

/// Default replay window in seconds.
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Webhook verification settings.
#[derive(Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared HMAC secret.
    pub secret: String,
    /// Maximum allowed |now - t| in seconds.
    #[serde(default = "default_tolerance")]
    pub tolerance_secs: u64,
}

fn default_tolerance() -> u64 {
    DEFAULT_TOLERANCE_SECS
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}
