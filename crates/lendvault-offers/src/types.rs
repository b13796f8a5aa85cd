use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A decrypted lender offer.
///
/// A recognized key is lifted into its typed field only when the value has
/// that field's type and re-serializes to the same JSON. Everything else,
/// including explicit `null`s and mistyped known keys, stays verbatim in
/// `additional_fields`, so re-serializing loses nothing.
///
/// Money and rate fields are kept as [`Number`] so `25000` and `25000.0`
/// survive unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct DecryptedOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apr: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origination_fee: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Keys outside the schema above, and known keys whose value did not fit.
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl From<Map<String, Value>> for DecryptedOffer {
    fn from(fields: Map<String, Value>) -> Self {
        let mut offer = Self::default();
        for (key, value) in fields {
            if let Some(value) = offer.take_known(&key, value) {
                offer.additional_fields.insert(key, value);
            }
        }
        offer
    }
}

impl DecryptedOffer {
    /// Store `value` in the typed field for `key`. Returns the value when
    /// the key is unknown or the value does not fit the field.
    fn take_known(&mut self, key: &str, value: Value) -> Option<Value> {
        match key {
            "offerId" => lift(&mut self.offer_id, value),
            "lenderId" => lift(&mut self.lender_id, value),
            "applicationId" => lift(&mut self.application_id, value),
            "amount" => lift(&mut self.amount, value),
            "apr" => lift(&mut self.apr, value),
            "interestRate" => lift(&mut self.interest_rate, value),
            "termMonths" => lift(&mut self.term_months, value),
            "monthlyPayment" => lift(&mut self.monthly_payment, value),
            "originationFee" => lift(&mut self.origination_fee, value),
            "currency" => lift(&mut self.currency, value),
            "expiresAt" => lift(&mut self.expires_at, value),
            "status" => lift(&mut self.status, value),
            _ => Some(value),
        }
    }
}

fn lift<T>(slot: &mut Option<T>, value: Value) -> Option<Value>
where
    T: Serialize + DeserializeOwned,
{
    if value.is_null() {
        return Some(value);
    }
    match T::deserialize(&value) {
        Ok(typed) if serde_json::to_value(&typed).ok().as_ref() == Some(&value) => {
            *slot = Some(typed);
            None
        }
        _ => Some(value),
    }
}

/// Outcome of opening one offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferVerification {
    pub data: DecryptedOffer,
    /// SHA-256 hex of the encrypted payload string as received.
    pub checksum: String,
    /// `checksum` equals the checksum the lender asserted.
    pub verified: bool,
}

/// Per-item outcome of a batch verification.
///
/// On failure `details` is `None`, `verified` is false and `error` holds the
/// message; `checksum` is always populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchVerification<T> {
    pub offer: T,
    pub details: Option<DecryptedOffer>,
    pub checksum: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An encrypted offer as delivered by the platform, plus whatever context
/// the caller wants carried through to the result.
pub trait EncryptedOfferRecord {
    /// Envelope JSON exactly as received.
    fn encrypted_payload(&self) -> &str;
    /// Checksum asserted by the lender.
    fn expected_checksum(&self) -> &str;
}

/// Minimal [`EncryptedOfferRecord`] for callers with no extra context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedOffer {
    pub encrypted_payload: String,
    pub expected_checksum: String,
}

impl EncryptedOfferRecord for EncryptedOffer {
    fn encrypted_payload(&self) -> &str {
        &self.encrypted_payload
    }

    fn expected_checksum(&self) -> &str {
        &self.expected_checksum
    }
}
