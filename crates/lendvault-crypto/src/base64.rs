use base64ct::{Base64, Encoding};

use crate::error::CryptoError;

/// Standard (padded) base64 encode, as used by every envelope field.
pub fn base64_encode(data: &[u8]) -> String {
    Base64::encode_string(data)
}

/// Standard (padded) base64 decode.
pub fn base64_decode(s: &str) -> Result<Vec<u8>, base64ct::Error> {
    Base64::decode_vec(s)
}

/// Decode a named envelope field, reporting which field was bad.
pub(crate) fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, CryptoError> {
    base64_decode(value).map_err(|e| CryptoError::Base64Decode {
        field,
        reason: e.to_string(),
    })
}

/// Decode a named field that must be exactly `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(
    field: &'static str,
    value: &str,
) -> Result<[u8; N], CryptoError> {
    let bytes = decode_field(field, value)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| CryptoError::InvalidFieldLength {
        field,
        expected: N,
        got: bytes.len(),
    })
}
