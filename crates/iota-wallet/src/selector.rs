//! Unspent-address selection.
//!
//! Finds the lowest-index address the ledger reports as never spent from,
//! for use as a receive or change address. When picking a change address
//! the caller supplies the indices already selected as inputs; reusing an
//! input address as change would corrupt the bundle's value accounting, so
//! a collision restarts the search one past the colliding index.

use crate::crypto::CryptoProvider;
use crate::error::WalletError;
use crate::ledger::LedgerClient;
use crate::scanner::{derive_batch, SCAN_BATCH_SIZE};
use iota_types::{Address, SecurityLevel, Seed};
use log::debug;

/// An unspent address found by a search.
#[derive(Debug)]
pub struct UnspentAddress {
    pub address: Address,
    pub index: u32,
    /// Highest index confirmed spent before the unspent address was found,
    /// for the wallet's cursor bookkeeping.
    pub highest_spent: Option<u32>,
}

/// Find the first never-spent address at or after `start_index`, skipping
/// any index in `exclude`.
pub async fn find_unspent_address<L, C>(
    ledger: &L,
    crypto: &C,
    seed: &Seed,
    security: SecurityLevel,
    start_index: u32,
    exclude: &[u32],
) -> Result<UnspentAddress, WalletError>
where
    L: LedgerClient + ?Sized,
    C: CryptoProvider + ?Sized,
{
    let mut start = start_index;
    let mut highest_spent = None;

    'search: loop {
        let mut index = start;
        loop {
            let batch_start = index;
            let batch = derive_batch(crypto, seed, security, batch_start, SCAN_BATCH_SIZE).await?;
            index += SCAN_BATCH_SIZE as u32;

            let spent = ledger.were_addresses_spent_from(&batch).await?;
            for (offset, &was_spent) in spent.iter().enumerate() {
                let addr_index = batch_start + offset as u32;
                if was_spent {
                    highest_spent = Some(addr_index);
                    continue;
                }
                if exclude.contains(&addr_index) {
                    debug!(
                        "unspent address {} is a selected input, resuming past it",
                        addr_index
                    );
                    start = addr_index + 1;
                    continue 'search;
                }
                return Ok(UnspentAddress {
                    address: batch[offset].clone(),
                    index: addr_index,
                    highest_spent,
                });
            }
        }
    }
}
