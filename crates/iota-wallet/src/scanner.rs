//! Balance discovery over the seed's address space.
//!
//! Walks address indices in fixed-size batches, querying the ledger node
//! for balances, and stops either when a needed balance is covered or when
//! the tail of never-used addresses is reached. Spent addresses with zero
//! balance are expected mid-scan (funds move on), so an all-zero batch only
//! ends the scan when none of its addresses was ever spent from.

use crate::crypto::CryptoProvider;
use crate::error::WalletError;
use crate::ledger::LedgerClient;
use iota_types::{Address, SecurityLevel, Seed};
use log::debug;

/// Addresses per node request. Balances the per-request overhead against
/// node-side request size limits.
pub const SCAN_BATCH_SIZE: usize = 8;

/// Options for a balance scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// First address index to examine.
    pub start_index: u32,
    /// Stop as soon as the running total reaches this amount; 0 scans all
    /// the way to the unused tail.
    pub needed_balance: u64,
    /// Cap on the number of retained (index, balance) entries; 0 is
    /// unbounded. Balances beyond the cap still count toward the total, so
    /// shortfall classification stays accurate.
    pub max_inputs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            needed_balance: 0,
            max_inputs: 0,
        }
    }
}

/// One address index holding a positive balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBalance {
    pub index: u32,
    pub balance: u64,
}

/// Result of a balance scan.
#[derive(Debug)]
pub struct BalanceScan {
    /// Retained positive-balance addresses, ascending by index.
    pub found: Vec<AddressBalance>,
    /// Sum of all positive balances seen, including any beyond the
    /// retention cap.
    pub total: u64,
    /// Index immediately after the last address examined; pass it back as
    /// `start_index` to resume.
    pub next_index: u32,
}

/// Derive a run of consecutive addresses, yielding to the scheduler after
/// each one (derivation is the hot loop of every scan).
pub(crate) async fn derive_batch<C>(
    crypto: &C,
    seed: &Seed,
    security: SecurityLevel,
    start: u32,
    count: usize,
) -> Result<Vec<Address>, WalletError>
where
    C: CryptoProvider + ?Sized,
{
    let mut addresses = Vec::with_capacity(count);
    for offset in 0..count {
        addresses.push(crypto.derive_address(seed, start + offset as u32, security)?);
        tokio::task::yield_now().await;
    }
    Ok(addresses)
}

/// Scan ascending address indices for positive balances.
///
/// Network errors abort the whole scan; no partial result is returned.
pub async fn scan_addresses_with_balance<L, C>(
    ledger: &L,
    crypto: &C,
    seed: &Seed,
    security: SecurityLevel,
    options: &ScanOptions,
) -> Result<BalanceScan, WalletError>
where
    L: LedgerClient + ?Sized,
    C: CryptoProvider + ?Sized,
{
    let mut found = Vec::new();
    let mut total: u64 = 0;
    let mut index = options.start_index;

    loop {
        let batch_start = index;
        let batch = derive_batch(crypto, seed, security, batch_start, SCAN_BATCH_SIZE).await?;
        index += SCAN_BATCH_SIZE as u32;

        let balances = ledger.get_balances(&batch).await?;

        let mut batch_total: u64 = 0;
        for (offset, &balance) in balances.iter().enumerate() {
            if balance == 0 {
                continue;
            }
            batch_total += balance;
            if options.max_inputs == 0 || found.len() < options.max_inputs {
                found.push(AddressBalance {
                    index: batch_start + offset as u32,
                    balance,
                });
            }
            if options.needed_balance != 0 && total + batch_total >= options.needed_balance {
                // Threshold crossed mid-batch: stop at the crossing element
                // and resume exactly one past it, not at the batch boundary.
                total += batch_total;
                let next_index = batch_start + offset as u32 + 1;
                debug!(
                    "needed balance {} covered by {} address(es), resuming at {}",
                    options.needed_balance,
                    found.len(),
                    next_index
                );
                return Ok(BalanceScan {
                    found,
                    total,
                    next_index,
                });
            }
        }

        if batch_total > 0 {
            total += batch_total;
            continue;
        }

        // Nothing in this batch: the tail is reached only if none of these
        // addresses was ever spent from. Spent addresses leave gaps.
        let spent = ledger.were_addresses_spent_from(&batch).await?;
        if spent.iter().any(|&s| s) {
            debug!(
                "zero-balance gap at {}..{} with spent addresses, continuing",
                batch_start, index
            );
            continue;
        }

        debug!(
            "unused tail reached at {}: {} address(es) hold {}",
            batch_start,
            found.len(),
            total
        );
        return Ok(BalanceScan {
            found,
            total,
            next_index: index,
        });
    }
}
