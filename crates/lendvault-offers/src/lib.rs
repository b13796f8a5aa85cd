//! Integrity verification of lender-supplied encrypted offers.
//!
//! Each offer arrives as envelope JSON plus a SHA-256 checksum asserted by
//! the lender. Verification decrypts with the neobank's private key, splits
//! the offer into known and lender-specific fields, and compares checksums.
//! Batch verification never lets one bad record affect another.

mod error;
mod types;
mod verify;

pub use error::OfferError;
pub use types::{
    BatchVerification, DecryptedOffer, EncryptedOffer, EncryptedOfferRecord, OfferVerification,
};
pub use verify::{verify_offer, verify_offers};
