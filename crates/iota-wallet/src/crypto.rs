//! Cryptographic backend seam.
//!
//! The wallet engine never derives addresses, hashes bundles, or signs
//! transactions itself; it delegates to an implementation of
//! [`CryptoProvider`]. Derivation must be deterministic and pure: for a
//! given (seed, index, security) the same address comes back every time.

use iota_types::{Address, Bundle, BundleDescription, SecurityLevel, Seed};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("address must carry a valid checksum, got {0} trytes")]
    BadAddressLength(usize),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("bundle buffer allocation failed: {0}")]
    OutOfMemory(String),

    #[error("{0}")]
    Backend(String),
}

/// Provider of seed-derived addresses, checksums, and bundle construction.
pub trait CryptoProvider: Send + Sync {
    /// Derive the address at `index` for `seed` at the given security level.
    fn derive_address(
        &self,
        seed: &Seed,
        index: u32,
        security: SecurityLevel,
    ) -> Result<Address, CryptoError>;

    /// Build the raw signed transaction records and the bundle hash for a
    /// bundle description. The returned records are in attach-ready order.
    fn build_bundle(
        &self,
        seed: &Seed,
        description: &BundleDescription,
    ) -> Result<Bundle, CryptoError>;

    /// Verify the 9-tryte checksum of a 90-tryte address and return its
    /// 81-tryte core form.
    fn verify_checksum(&self, address: &str) -> Result<Address, CryptoError>;

    /// Append the 9-tryte checksum to a core address.
    fn address_with_checksum(&self, address: &Address) -> Result<String, CryptoError>;
}

impl<'a, T: CryptoProvider + ?Sized> CryptoProvider for &'a T {
    fn derive_address(
        &self,
        seed: &Seed,
        index: u32,
        security: SecurityLevel,
    ) -> Result<Address, CryptoError> {
        (**self).derive_address(seed, index, security)
    }

    fn build_bundle(
        &self,
        seed: &Seed,
        description: &BundleDescription,
    ) -> Result<Bundle, CryptoError> {
        (**self).build_bundle(seed, description)
    }

    fn verify_checksum(&self, address: &str) -> Result<Address, CryptoError> {
        (**self).verify_checksum(address)
    }

    fn address_with_checksum(&self, address: &Address) -> Result<String, CryptoError> {
        (**self).address_with_checksum(address)
    }
}
