//! Raw transaction record parsing.
//!
//! Decodes the 2673-tryte wire encoding of a transaction into its fields.
//! Numeric fields are balanced-ternary integers (see [`crate::trytes`]).

use crate::address::{Address, AddressError};
use crate::constants::{tx_layout, Field, TRANSACTION_TRYTES};
use crate::trytes::{validate_trytes, TryteError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("raw transaction must be {TRANSACTION_TRYTES} trytes, got {0}")]
    BadLength(usize),

    #[error(transparent)]
    Trytes(#[from] TryteError),

    #[error(transparent)]
    Address(#[from] AddressError),
}

/// A decoded raw transaction record.
#[derive(Debug, Clone)]
pub struct ParsedTransaction {
    pub signature_message_fragment: String,
    pub address: Address,
    pub value: i64,
    pub obsolete_tag: String,
    pub timestamp: i64,
    pub current_index: i64,
    pub last_index: i64,
    pub bundle: String,
    pub trunk: String,
    pub branch: String,
    pub tag: String,
    pub attachment_timestamp: i64,
    pub attachment_timestamp_lower_bound: i64,
    pub attachment_timestamp_upper_bound: i64,
    pub nonce: String,
}

fn field(trytes: &str, layout: Field) -> &str {
    &trytes[layout.range()]
}

fn numeric(trytes: &str, layout: Field) -> Result<i64, TryteError> {
    crate::trytes::trytes_to_i64(field(trytes, layout))
}

impl ParsedTransaction {
    /// Decode a raw transaction from its tryte representation.
    pub fn from_trytes(trytes: &str) -> Result<Self, TransactionError> {
        if trytes.len() != TRANSACTION_TRYTES {
            return Err(TransactionError::BadLength(trytes.len()));
        }
        validate_trytes(trytes)?;

        Ok(Self {
            signature_message_fragment: field(trytes, tx_layout::SIGNATURE_MESSAGE).to_string(),
            address: Address::from_trytes(field(trytes, tx_layout::ADDRESS))?,
            value: numeric(trytes, tx_layout::VALUE)?,
            obsolete_tag: field(trytes, tx_layout::OBSOLETE_TAG).to_string(),
            timestamp: numeric(trytes, tx_layout::TIMESTAMP)?,
            current_index: numeric(trytes, tx_layout::CURRENT_INDEX)?,
            last_index: numeric(trytes, tx_layout::LAST_INDEX)?,
            bundle: field(trytes, tx_layout::BUNDLE).to_string(),
            trunk: field(trytes, tx_layout::TRUNK).to_string(),
            branch: field(trytes, tx_layout::BRANCH).to_string(),
            tag: field(trytes, tx_layout::TAG).to_string(),
            attachment_timestamp: numeric(trytes, tx_layout::ATTACHMENT_TIMESTAMP)?,
            attachment_timestamp_lower_bound: numeric(trytes, tx_layout::ATTACHMENT_TIMESTAMP_LOWER)?,
            attachment_timestamp_upper_bound: numeric(trytes, tx_layout::ATTACHMENT_TIMESTAMP_UPPER)?,
            nonce: field(trytes, tx_layout::NONCE).to_string(),
        })
    }
}
