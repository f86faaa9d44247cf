//! Tangle address newtype.

use crate::constants::{ADDR_WITH_CHECKSUM_TRYTES, HASH_TRYTES};
use crate::trytes::{validate_trytes_exact, TryteError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be {HASH_TRYTES} trytes, got {0}")]
    BadLength(usize),

    #[error(transparent)]
    Trytes(#[from] TryteError),
}

/// An 81-tryte address in its core form, without checksum.
///
/// Checksummed 90-tryte addresses are plain strings produced and verified by
/// the cryptographic backend; this type only carries the core form the
/// ledger node understands.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Parse and validate an address from its 81-tryte core representation.
    pub fn from_trytes(trytes: &str) -> Result<Self, AddressError> {
        if trytes.len() != HASH_TRYTES {
            return Err(AddressError::BadLength(trytes.len()));
        }
        validate_trytes_exact(trytes, HASH_TRYTES)?;
        Ok(Self(trytes.to_string()))
    }

    /// The raw tryte representation.
    pub fn as_trytes(&self) -> &str {
        &self.0
    }
}

/// Whether a string has the length of a checksummed address.
pub fn has_checksum_length(address: &str) -> bool {
    address.len() == ADDR_WITH_CHECKSUM_TRYTES
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}
