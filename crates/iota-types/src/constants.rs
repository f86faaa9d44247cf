//! Tangle protocol constants and the raw transaction tryte layout.

// =============================================================================
// Tryte Lengths
// =============================================================================

/// Length in trytes of a seed, an address (without checksum), and a
/// transaction or bundle hash.
pub const HASH_TRYTES: usize = 81;

/// Length in trytes of the checksum appended to a human-facing address.
pub const ADDR_CHECKSUM_TRYTES: usize = 9;

/// Length in trytes of an address with its checksum appended.
pub const ADDR_WITH_CHECKSUM_TRYTES: usize = HASH_TRYTES + ADDR_CHECKSUM_TRYTES;

/// Maximum length in trytes of a transaction tag.
pub const TAG_TRYTES: usize = 27;

/// Length in trytes of one raw transaction record.
pub const TRANSACTION_TRYTES: usize = 2673;

// =============================================================================
// Bundle Limits
// =============================================================================

/// Hard ceiling on the number of transactions in one bundle.
pub const MAX_BUNDLE_TXS: usize = 8;

/// Bundle slots reserved for the output transaction and the change
/// transaction. Each input consumes one slot per security level on top of
/// these, so the usable input count shrinks as security rises.
pub const RESERVED_BUNDLE_TXS: usize = 2;

// =============================================================================
// Network Defaults
// =============================================================================

/// Default minimum weight magnitude for Proof of Work on the main tangle.
pub const DEFAULT_MIN_WEIGHT_MAGNITUDE: u32 = 14;

/// Random walk depth used when requesting transactions to approve.
pub const TIP_SELECTION_DEPTH: u32 = 10;

// =============================================================================
// Raw Transaction Layout
// =============================================================================

/// One field of the 2673-tryte raw transaction record.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Offset of the field in trytes from the start of the record.
    pub offset: usize,
    /// Length of the field in trytes.
    pub trytes: usize,
}

impl Field {
    /// Tryte range covered by this field.
    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.trytes
    }
}

/// Field offsets of the raw transaction tryte encoding.
pub mod tx_layout {
    use super::Field;

    pub const SIGNATURE_MESSAGE: Field = Field { offset: 0, trytes: 2187 };
    pub const ADDRESS: Field = Field { offset: 2187, trytes: 81 };
    pub const VALUE: Field = Field { offset: 2268, trytes: 27 };
    pub const OBSOLETE_TAG: Field = Field { offset: 2295, trytes: 27 };
    pub const TIMESTAMP: Field = Field { offset: 2322, trytes: 9 };
    pub const CURRENT_INDEX: Field = Field { offset: 2331, trytes: 9 };
    pub const LAST_INDEX: Field = Field { offset: 2340, trytes: 9 };
    pub const BUNDLE: Field = Field { offset: 2349, trytes: 81 };
    pub const TRUNK: Field = Field { offset: 2430, trytes: 81 };
    pub const BRANCH: Field = Field { offset: 2511, trytes: 81 };
    pub const TAG: Field = Field { offset: 2592, trytes: 27 };
    pub const ATTACHMENT_TIMESTAMP: Field = Field { offset: 2619, trytes: 9 };
    pub const ATTACHMENT_TIMESTAMP_LOWER: Field = Field { offset: 2628, trytes: 9 };
    pub const ATTACHMENT_TIMESTAMP_UPPER: Field = Field { offset: 2637, trytes: 9 };
    pub const NONCE: Field = Field { offset: 2646, trytes: 27 };
}
