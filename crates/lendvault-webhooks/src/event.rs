use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An authenticated webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedWebhookEvent {
    pub id: String,
    #[serde(alias = "type")]
    pub event_type: String,
    pub data: Value,
    pub timestamp: String,
    pub version: String,
}
