//! SHA-256 integrity fingerprints.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Whether `data` hashes to `expected_hex`.
pub fn verify_checksum(data: &[u8], expected_hex: &str) -> bool {
    sha256_hex(data) == expected_hex
}
