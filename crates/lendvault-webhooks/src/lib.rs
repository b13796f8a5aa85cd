//! Webhook authentication.
//!
//! Inbound webhooks carry a `t=<unix-seconds>,v1=<hex>` header where the
//! signature is HMAC-SHA256 over `"{t}.{raw_body}"` with a shared secret.
//! A signature older or newer than the tolerance window is rejected even
//! when the HMAC is correct.

mod config;
mod error;
mod event;
mod signature;

pub use config::{WebhookConfig, DEFAULT_TOLERANCE_SECS};
pub use error::WebhookError;
pub use event::SignedWebhookEvent;
pub use signature::WebhookVerifier;
