//! RSA fixtures for tests. Not for production key management.

use std::sync::OnceLock;

use aes_gcm::aead::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Fixture modulus size.
pub const FIXTURE_KEY_BITS: usize = 2048;

/// A PEM-encoded RSA keypair (SPKI public, PKCS#8 private).
#[derive(Debug, Clone, Copy)]
pub struct KeyPairPem {
    pub public_pem: &'static str,
    pub private_pem: &'static str,
}

/// Generate a fresh keypair of the given size.
pub fn generate_keypair_pem(bits: usize) -> (String, String) {
    let private = RsaPrivateKey::new(&mut OsRng, bits).expect("RSA key generation");
    let public = RsaPublicKey::from(&private);
    let public_pem = public
        .to_public_key_pem(LineEnding::LF)
        .expect("encode SPKI PEM");
    let private_pem = private
        .to_pkcs8_pem(LineEnding::LF)
        .expect("encode PKCS#8 PEM")
        .to_string();
    (public_pem, private_pem)
}

fn cached(cell: &'static OnceLock<(String, String)>) -> KeyPairPem {
    let (public_pem, private_pem) = cell.get_or_init(|| generate_keypair_pem(FIXTURE_KEY_BITS));
    KeyPairPem {
        public_pem,
        private_pem,
    }
}

/// Process-wide fixture keypair ("neobank" / first lender).
pub fn fixture_keypair() -> KeyPairPem {
    static KEYS: OnceLock<(String, String)> = OnceLock::new();
    cached(&KEYS)
}

/// A second, unrelated keypair for key-isolation tests.
pub fn other_keypair() -> KeyPairPem {
    static KEYS: OnceLock<(String, String)> = OnceLock::new();
    cached(&KEYS)
}
