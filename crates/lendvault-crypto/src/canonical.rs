//! Canonical JSON: sorted keys, no whitespace.

use serde::Serialize;
use serde_json::Value;

use crate::error::CryptoError;

/// Canonical JSON serialization of a JSON value.
/// Deterministic regardless of key insertion order.
pub fn canonical_json(value: &Value) -> Result<String, CryptoError> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
        Value::Number(n) => {
            let f = n.as_f64().unwrap_or(f64::NAN);
            if !f.is_finite() {
                return Err(CryptoError::NonFiniteNumber);
            }
            to_json_string(n)
        }
        Value::String(s) => to_json_string(s),
        Value::Array(arr) => {
            let items: Result<Vec<String>, _> = arr.iter().map(canonical_json).collect();
            Ok(format!("[{}]", items?.join(",")))
        }
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let pairs: Result<Vec<String>, CryptoError> = keys
                .iter()
                .map(|k| -> Result<String, CryptoError> {
                    Ok(format!("{}:{}", to_json_string(*k)?, canonical_json(&obj[*k])?))
                })
                .collect();
            Ok(format!("{{{}}}", pairs?.join(",")))
        }
    }
}

/// Serialize any value to its canonical JSON string.
pub fn to_canonical_string<T: Serialize + ?Sized>(data: &T) -> Result<String, CryptoError> {
    let value =
        serde_json::to_value(data).map_err(|e| CryptoError::SerializationError(e.to_string()))?;
    canonical_json(&value)
}

fn to_json_string<T: Serialize + ?Sized>(v: &T) -> Result<String, CryptoError> {
    serde_json::to_string(v).map_err(|e| CryptoError::SerializationError(e.to_string()))
}
