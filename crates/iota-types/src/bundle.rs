//! Bundle description types.
//!
//! A bundle is an atomically-applied group of transactions representing one
//! logical transfer: one output, zero or more inputs, and an optional change
//! transaction returning the remainder. The description here is what the
//! wallet engine assembles; the cryptographic backend turns it into the raw
//! signed transaction records and the bundle hash.

use crate::address::Address;
use crate::constants::{MAX_BUNDLE_TXS, TRANSACTION_TRYTES};
use crate::seed::SecurityLevel;
use crate::tag::Tag;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("input values sum to {inputs}, less than the output value {output}")]
    InputsBelowOutput { inputs: u64, output: u64 },

    #[error("change of {change} does not match remainder {remainder}")]
    ChangeMismatch { change: u64, remainder: u64 },

    #[error("remainder of {0} requires a change transaction")]
    MissingChange(u64),

    #[error("zero-value bundle must have no inputs or change")]
    UnexpectedInputs,

    #[error("{txs} transactions exceed the bundle ceiling of {MAX_BUNDLE_TXS}")]
    TooManyTransactions { txs: usize },
}

/// An output transaction: recipient (or change) address, value, and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    pub address: Address,
    pub value: u64,
    pub tag: Tag,
}

/// An input transaction: a seed-derived address being spent, the key index
/// it was derived from, and the full balance it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleInput {
    pub address: Address,
    pub key_index: u32,
    pub value: u64,
}

/// Everything the cryptographic backend needs to construct one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDescription {
    pub output: BundleOutput,
    pub inputs: Vec<BundleInput>,
    pub change: Option<BundleOutput>,
    /// Unix timestamp stamped at assembly time.
    pub timestamp: u64,
    pub security: SecurityLevel,
}

impl BundleDescription {
    /// Total value carried by the input transactions.
    pub fn input_total(&self) -> u64 {
        self.inputs.iter().map(|input| input.value).sum()
    }

    /// Number of raw transactions this description expands to: one for the
    /// output, one per input per security level, one for change if present.
    pub fn transaction_count(&self) -> usize {
        1 + self.inputs.len() * self.security.as_u8() as usize
            + usize::from(self.change.is_some())
    }

    /// Check the value-accounting invariants.
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.output.value == 0 {
            if !self.inputs.is_empty() || self.change.is_some() {
                return Err(BundleError::UnexpectedInputs);
            }
            return Ok(());
        }

        let inputs = self.input_total();
        if inputs < self.output.value {
            return Err(BundleError::InputsBelowOutput {
                inputs,
                output: self.output.value,
            });
        }

        let remainder = inputs - self.output.value;
        match (&self.change, remainder) {
            (None, 0) => {}
            (None, r) => return Err(BundleError::MissingChange(r)),
            (Some(change), r) if change.value != r => {
                return Err(BundleError::ChangeMismatch {
                    change: change.value,
                    remainder: r,
                })
            }
            (Some(_), _) => {}
        }

        let txs = self.transaction_count();
        if txs > MAX_BUNDLE_TXS {
            return Err(BundleError::TooManyTransactions { txs });
        }
        Ok(())
    }
}

/// A constructed bundle: its hash and the raw transaction records, in
/// attach-ready order (highest bundle index first, as the node's attach
/// operation expects).
#[derive(Debug, Clone)]
pub struct Bundle {
    pub hash: String,
    pub trytes: Vec<String>,
}

impl Bundle {
    /// Whether every record has the raw transaction length.
    pub fn records_well_formed(&self) -> bool {
        self.trytes.iter().all(|tx| tx.len() == TRANSACTION_TRYTES)
    }
}
