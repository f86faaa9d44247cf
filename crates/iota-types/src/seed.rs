//! Wallet seed and security level.

use crate::constants::{HASH_TRYTES, MAX_BUNDLE_TXS, RESERVED_BUNDLE_TXS};
use crate::trytes::{validate_trytes_exact, TryteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed must be {HASH_TRYTES} trytes, got {0}")]
    BadLength(usize),

    #[error(transparent)]
    Trytes(#[from] TryteError),
}

/// An 81-tryte wallet seed.
///
/// The seed is the sole source of all derived material and is never
/// transmitted. Its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    /// Parse and validate a seed from its tryte representation.
    pub fn from_trytes(trytes: &str) -> Result<Self, SeedError> {
        if trytes.len() != HASH_TRYTES {
            return Err(SeedError::BadLength(trytes.len()));
        }
        validate_trytes_exact(trytes, HASH_TRYTES)?;
        Ok(Self(trytes.to_string()))
    }

    /// The raw tryte representation.
    pub fn as_trytes(&self) -> &str {
        &self.0
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, SeedError> {
        Self::from_trytes(s)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Signature security level.
///
/// Controls address derivation cost and signature strength. Each input
/// transaction in a bundle consumes one signature fragment per level, so
/// higher levels leave room for fewer inputs per bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SecurityLevel {
    One = 1,
    Two = 2,
    Three = 3,
}

impl SecurityLevel {
    /// The numeric level (1 to 3).
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maximum number of input addresses one bundle can spend at this level.
    ///
    /// The bundle format caps total transactions at [`MAX_BUNDLE_TXS`], two
    /// slots are reserved for the output and change transactions, and each
    /// input takes one slot per security level.
    pub fn max_bundle_inputs(self) -> usize {
        (MAX_BUNDLE_TXS - RESERVED_BUNDLE_TXS) / self.as_u8() as usize
    }
}

impl Default for SecurityLevel {
    fn default() -> Self {
        SecurityLevel::Two
    }
}

/// Error for out-of-range security level values.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("security level must be between 1 and 3, got {0}")]
pub struct InvalidSecurityLevel(pub u8);

impl TryFrom<u8> for SecurityLevel {
    type Error = InvalidSecurityLevel;

    fn try_from(value: u8) -> Result<Self, InvalidSecurityLevel> {
        match value {
            1 => Ok(SecurityLevel::One),
            2 => Ok(SecurityLevel::Two),
            3 => Ok(SecurityLevel::Three),
            _ => Err(InvalidSecurityLevel(value)),
        }
    }
}
