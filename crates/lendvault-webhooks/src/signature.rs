//! Webhook signature verification.
//!
//! Header format: `t=<unix-seconds>,v1=<hex HMAC-SHA256>`
//! Signed message: `"{t}.{raw_body}"`, with `t` exactly as it appears in the header.

use hmac::{Hmac, Mac};
use lendvault_crypto::constant_time_eq;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::{WebhookConfig, DEFAULT_TOLERANCE_SECS};
use crate::error::WebhookError;
use crate::event::SignedWebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 output length in bytes.
const SIGNATURE_LENGTH: usize = 32;

/// Scheme tag for the signature component.
const SIGNATURE_SCHEME: &str = "v1";

/// Parsed signature header.
struct SignatureHeader<'a> {
    timestamp_raw: &'a str,
    timestamp: i64,
    signatures: Vec<&'a str>,
}

fn parse_header(header: &str) -> Result<SignatureHeader<'_>, WebhookError> {
    let mut timestamp_raw = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key.trim() {
            "t" if timestamp_raw.is_none() => timestamp_raw = Some(value.trim()),
            SIGNATURE_SCHEME => signatures.push(value.trim()),
            _ => {}
        }
    }

    let timestamp_raw = timestamp_raw
        .ok_or_else(|| WebhookError::MalformedSignature("missing t= component".to_string()))?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedSignature(
            "missing v1= component".to_string(),
        ));
    }
    let timestamp = timestamp_raw.parse::<i64>().map_err(|_| {
        WebhookError::MalformedSignature(format!("timestamp is not an integer: {}", timestamp_raw))
    })?;

    Ok(SignatureHeader {
        timestamp_raw,
        timestamp,
        signatures,
    })
}

/// Verifies and produces webhook signatures for one shared secret.
pub struct WebhookVerifier {
    secret: Zeroizing<String>,
    tolerance_secs: u64,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

impl WebhookVerifier {
    /// Create a verifier with the default 300 second tolerance.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.secret.clone()).with_tolerance(config.tolerance_secs)
    }

    pub fn with_tolerance(mut self, tolerance_secs: u64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    pub fn tolerance_secs(&self) -> u64 {
        self.tolerance_secs
    }

    /// Verify `signature_header` against `raw_body` at the current time.
    ///
    /// `raw_body` must be the bytes received, not a re-serialization.
    pub fn verify(&self, raw_body: &str, signature_header: &str) -> Result<(), WebhookError> {
        self.verify_at(raw_body, signature_header, now_unix())
    }

    /// Verify as of `now` (unix seconds).
    pub fn verify_at(
        &self,
        raw_body: &str,
        signature_header: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let result = self.check(raw_body, signature_header, now);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "rejected webhook signature");
        }
        result
    }

    fn check(&self, raw_body: &str, signature_header: &str, now: i64) -> Result<(), WebhookError> {
        if signature_header.trim().is_empty() {
            return Err(WebhookError::MissingSignature);
        }
        let header = parse_header(signature_header)?;

        if now.abs_diff(header.timestamp) > self.tolerance_secs {
            return Err(WebhookError::TimestampOutOfTolerance {
                timestamp: header.timestamp,
                now,
                tolerance_secs: self.tolerance_secs,
            });
        }

        let expected = self.sign(header.timestamp_raw, raw_body);
        let matched = header.signatures.iter().any(|candidate| {
            // Wrong length or non-hex never matches
            let mut supplied = [0u8; SIGNATURE_LENGTH];
            hex::decode_to_slice(candidate, &mut supplied).is_ok()
                && constant_time_eq(&expected, &supplied)
        });

        if matched {
            Ok(())
        } else {
            Err(WebhookError::SignatureMismatch)
        }
    }

    /// Verify, then parse. The body is never parsed before it is authenticated.
    pub fn construct_event(
        &self,
        raw_body: &str,
        signature_header: &str,
    ) -> Result<SignedWebhookEvent, WebhookError> {
        self.verify(raw_body, signature_header)?;
        let event: SignedWebhookEvent = serde_json::from_str(raw_body)?;
        tracing::debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            "verified webhook event"
        );
        Ok(event)
    }

    /// A valid header for `raw_body` stamped with the current time.
    pub fn generate_test_header(&self, raw_body: &str) -> String {
        self.generate_header_at(raw_body, now_unix())
    }

    /// A valid header for `raw_body` stamped with `timestamp`.
    pub fn generate_header_at(&self, raw_body: &str, timestamp: i64) -> String {
        let timestamp = timestamp.to_string();
        let signature = self.sign(&timestamp, raw_body);
        format!(
            "t={},{}={}",
            timestamp,
            SIGNATURE_SCHEME,
            hex::encode(signature)
        )
    }

    fn sign(&self, timestamp: &str, raw_body: &str) -> [u8; SIGNATURE_LENGTH] {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(raw_body.as_bytes());
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&mac.finalize().into_bytes());
        signature
    }
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
