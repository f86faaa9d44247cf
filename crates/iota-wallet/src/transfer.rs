//! Transfer request and receipt types.

use iota_types::Address;

/// A request to move value to a recipient.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Amount to send; 0 builds a pure address-attachment bundle with no
    /// inputs or change.
    pub value: u64,
    /// Recipient address in its 90-tryte checksummed form.
    pub recipient: String,
    /// Transfer tag, up to 27 trytes; empty means no tag.
    pub tag: String,
    /// First address index to scan for inputs. `None` scans from 0.
    pub input_start: Option<u32>,
    /// First address index to consider for the change address. `None` lets
    /// the wallet use its cached cursor state.
    pub change_start: Option<u32>,
}

impl TransferRequest {
    /// A transfer of `value` to `recipient` with no tag and internal cursor
    /// management.
    pub fn new(value: u64, recipient: impl Into<String>) -> Self {
        Self {
            value,
            recipient: recipient.into(),
            tag: String::new(),
            input_start: None,
            change_start: None,
        }
    }
}

/// Result of a completed transfer.
#[derive(Debug)]
pub struct TransferReceipt {
    /// Hash of the bundle that was stored and broadcast.
    pub bundle_hash: String,
    /// Key indices of the addresses spent as inputs, ascending.
    pub input_indices: Vec<u32>,
    /// Key index of the change address, when a remainder was returned.
    pub change_index: Option<u32>,
    /// First address index not consumed by input selection; pass it as
    /// `input_start` of a later transfer to avoid re-scanning.
    pub next_input_index: u32,
}

/// Result of a balance query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// Sum of all positive balances found.
    pub available: u64,
    /// Index immediately after the last address examined; pass it back as
    /// the start index of a later query to resume.
    pub next_index: u32,
}

/// A receive address and the key index it was derived from.
#[derive(Debug, Clone)]
pub struct ReceiveAddress {
    /// The address, checksummed when requested.
    pub address: String,
    /// Key index of the address.
    pub index: u32,
    /// Core form of the address, without checksum.
    pub core: Address,
}
