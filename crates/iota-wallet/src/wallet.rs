//! Main Wallet struct.
//!
//! Ties together balance scanning, unspent-address selection, bundle
//! assembly, and PoW dispatch into a single high-level API over a ledger
//! node and a cryptographic backend.
//!
//! A wallet instance owns unsynchronized cursor state; run one operation at
//! a time per instance, or use independent instances per seed.

use crate::crypto::CryptoProvider;
use crate::cursor::ScanCursor;
use crate::error::WalletError;
use crate::ledger::LedgerClient;
use crate::pow::{self, PowProvider};
use crate::scanner::{self, BalanceScan, ScanOptions};
use crate::selector::{self, UnspentAddress};
use crate::transfer::{Balance, ReceiveAddress, TransferReceipt, TransferRequest};
use iota_types::constants::{DEFAULT_MIN_WEIGHT_MAGNITUDE, TIP_SELECTION_DEPTH};
use iota_types::{
    Address, BundleDescription, BundleInput, BundleOutput, SecurityLevel, Seed, Tag,
};
use log::debug;

/// High-level wallet over a ledger node and a cryptographic backend.
pub struct Wallet<L, C> {
    ledger: L,
    crypto: C,
    seed: Seed,
    security: SecurityLevel,
    min_weight_magnitude: u32,
    pow_provider: Option<Box<dyn PowProvider>>,
    cursor: ScanCursor,
}

impl<L, C> Wallet<L, C>
where
    L: LedgerClient,
    C: CryptoProvider,
{
    /// Create a wallet managing the funds of `seed`.
    pub fn new(ledger: L, crypto: C, seed: Seed) -> Self {
        Self {
            ledger,
            crypto,
            seed,
            security: SecurityLevel::default(),
            min_weight_magnitude: DEFAULT_MIN_WEIGHT_MAGNITUDE,
            pow_provider: None,
            cursor: ScanCursor::Unknown,
        }
    }

    // ── Configuration ────────────────────────────────────────────────────

    /// Current signature security level.
    pub fn security_level(&self) -> SecurityLevel {
        self.security
    }

    /// Configure the signature security level.
    ///
    /// Each level derives a different address space, so memoized scan
    /// progress is discarded.
    pub fn set_security_level(&mut self, security: SecurityLevel) {
        if security != self.security {
            self.security = security;
            self.cursor = ScanCursor::Unknown;
        }
    }

    /// Current minimum weight magnitude for Proof of Work.
    pub fn min_weight_magnitude(&self) -> u32 {
        self.min_weight_magnitude
    }

    /// Configure the minimum weight magnitude for Proof of Work.
    pub fn set_min_weight_magnitude(&mut self, mwm: u32) {
        self.min_weight_magnitude = mwm;
    }

    /// Perform Proof of Work with `provider` instead of delegating it to
    /// the ledger node.
    pub fn set_pow_provider(&mut self, provider: impl PowProvider + 'static) {
        self.pow_provider = Some(Box::new(provider));
    }

    // ── Addresses ────────────────────────────────────────────────────────

    /// Derive the address at `index`, optionally with its checksum.
    pub fn get_address(&self, index: u32, with_checksum: bool) -> Result<String, WalletError> {
        let address = self.crypto.derive_address(&self.seed, index, self.security)?;
        self.render_address(address, index, with_checksum)
            .map(|r| r.address)
    }

    /// Find an address that can receive a transfer: the lowest-index
    /// address never spent from.
    ///
    /// With `start_index` unset the wallet manages scan progress itself,
    /// serving repeat calls from cache until a spend invalidates it. With
    /// an explicit `start_index` the caller owns resumption state and the
    /// internal cursor is left untouched.
    pub async fn get_receive_address(
        &mut self,
        with_checksum: bool,
        start_index: Option<u32>,
    ) -> Result<ReceiveAddress, WalletError> {
        if start_index.is_none() {
            if let Some(index) = self.cursor.cached_unspent() {
                let address = self.crypto.derive_address(&self.seed, index, self.security)?;
                return self.render_address(address, index, with_checksum);
            }
        }

        let start = start_index.unwrap_or_else(|| self.cursor.resume_index());
        let found = selector::find_unspent_address(
            &self.ledger,
            &self.crypto,
            &self.seed,
            self.security,
            start,
            &[],
        )
        .await?;

        if start_index.is_none() {
            self.cursor.cache_unspent(found.index);
        }

        self.render_address(found.address, found.index, with_checksum)
    }

    /// Addresses found carrying transactions on the tangle, from index 0 up
    /// to the first address with none.
    ///
    /// An absent address does not prove it was never used: its transactions
    /// may have been purged by a node snapshot.
    pub async fn find_used_addresses(&self) -> Result<Vec<Address>, WalletError> {
        let mut addresses = Vec::new();
        for index in 0u32.. {
            let address = self.crypto.derive_address(&self.seed, index, self.security)?;
            tokio::task::yield_now().await;
            let hashes = self
                .ledger
                .find_transactions(std::slice::from_ref(&address))
                .await?;
            if hashes.is_empty() {
                break;
            }
            addresses.push(address);
        }
        debug!("found {} used address(es)", addresses.len());
        Ok(addresses)
    }

    // ── Balance ──────────────────────────────────────────────────────────

    /// Total balance across the seed's addresses, scanned from
    /// `start_index` (or 0) to the unused tail.
    pub async fn get_balance(&self, start_index: Option<u32>) -> Result<Balance, WalletError> {
        let scan = self
            .scan(&ScanOptions {
                start_index: start_index.unwrap_or(0),
                needed_balance: 0,
                max_inputs: 0,
            })
            .await?;
        Ok(Balance {
            available: scan.total,
            next_index: scan.next_index,
        })
    }

    /// Address indices holding positive balances, with scan options exposed
    /// for resumable and bounded scans.
    pub async fn get_addresses_with_balance(
        &self,
        options: &ScanOptions,
    ) -> Result<BalanceScan, WalletError> {
        self.scan(options).await
    }

    // ── Transfers ────────────────────────────────────────────────────────

    /// Attach an address to the tangle with a zero-valued bundle.
    ///
    /// Returns the bundle hash.
    pub async fn attach_address(&self, address: &Address) -> Result<String, WalletError> {
        let description = BundleDescription {
            output: BundleOutput {
                address: address.clone(),
                value: 0,
                tag: Tag::default(),
            },
            inputs: Vec::new(),
            change: None,
            timestamp: 0,
            security: self.security,
        };
        self.submit_bundle(description).await
    }

    /// Send `request.value` to `request.recipient`, returning any remainder
    /// of the selected inputs to a freshly found change address.
    ///
    /// A zero value builds a pure address-attachment bundle: no balance
    /// scan, no inputs, no change. A failed transfer leaves the wallet's
    /// cursor state unchanged.
    pub async fn send_transfer(
        &mut self,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, WalletError> {
        let recipient = self
            .crypto
            .verify_checksum(&request.recipient)
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;
        let tag = if request.tag.is_empty() {
            Tag::default()
        } else {
            Tag::new(&request.tag).map_err(|e| WalletError::InvalidTag(e.to_string()))?
        };

        let max_inputs = self.security.max_bundle_inputs();
        let (inputs, total, next_input_index) = if request.value != 0 {
            let scan = self
                .scan(&ScanOptions {
                    start_index: request.input_start.unwrap_or(0),
                    needed_balance: request.value,
                    max_inputs,
                })
                .await?;
            debug!(
                "found {} input address(es) with total balance {}",
                scan.found.len(),
                scan.total
            );
            if scan.total < request.value {
                return Err(if scan.found.len() == max_inputs {
                    WalletError::FragmentedBalance {
                        needed: request.value,
                        available: scan.total,
                        inputs: scan.found.len(),
                    }
                } else {
                    WalletError::InsufficientBalance {
                        needed: request.value,
                        available: scan.total,
                    }
                });
            }
            let selected: u64 = scan.found.iter().map(|f| f.balance).sum();
            if selected < request.value {
                // Funds past the input cap covered the total, but the
                // retained inputs alone cannot fund the bundle.
                return Err(WalletError::FragmentedBalance {
                    needed: request.value,
                    available: scan.total,
                    inputs: scan.found.len(),
                });
            }
            (scan.found, selected, scan.next_index)
        } else {
            (Vec::new(), 0, request.input_start.unwrap_or(0))
        };

        let mut bundle_inputs = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let address = self
                .crypto
                .derive_address(&self.seed, input.index, self.security)?;
            debug!(
                "input: key index {}, address {}, value {}",
                input.index, address, input.balance
            );
            bundle_inputs.push(BundleInput {
                address,
                key_index: input.index,
                value: input.balance,
            });
        }

        let input_indices: Vec<u32> = inputs.iter().map(|i| i.index).collect();
        let remainder = total - request.value;
        let mut change_index = None;
        let change = if request.value != 0 && remainder != 0 {
            let found = self
                .find_change_address(request.change_start, &input_indices)
                .await?;
            debug!(
                "change: key index {}, address {}, value {}",
                found.index, found.address, remainder
            );
            change_index = Some(found.index);
            Some(BundleOutput {
                address: found.address,
                value: remainder,
                tag: tag.clone(),
            })
        } else {
            None
        };

        let description = BundleDescription {
            output: BundleOutput {
                address: recipient,
                value: request.value,
                tag,
            },
            inputs: bundle_inputs,
            change,
            timestamp: 0,
            security: self.security,
        };
        let bundle_hash = self.submit_bundle(description).await?;

        if request.value != 0 {
            let highest_input = if request.input_start.is_none() {
                input_indices.iter().copied().max()
            } else {
                None
            };
            self.cursor.invalidate_after_spend(highest_input);
        }

        Ok(TransferReceipt {
            bundle_hash,
            input_indices,
            change_index,
            next_input_index,
        })
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn scan(&self, options: &ScanOptions) -> Result<BalanceScan, WalletError> {
        scanner::scan_addresses_with_balance(
            &self.ledger,
            &self.crypto,
            &self.seed,
            self.security,
            options,
        )
        .await
    }

    /// Pick a change address, never reusing an address selected as input.
    async fn find_change_address(
        &self,
        change_start: Option<u32>,
        input_indices: &[u32],
    ) -> Result<UnspentAddress, WalletError> {
        if change_start.is_none() {
            if let Some(cached) = self.cursor.cached_unspent() {
                if !input_indices.contains(&cached) {
                    let address =
                        self.crypto.derive_address(&self.seed, cached, self.security)?;
                    return Ok(UnspentAddress {
                        address,
                        index: cached,
                        highest_spent: None,
                    });
                }
                // The cached address is being spent in this very bundle.
                return selector::find_unspent_address(
                    &self.ledger,
                    &self.crypto,
                    &self.seed,
                    self.security,
                    cached + 1,
                    input_indices,
                )
                .await;
            }
        }

        let start = change_start.unwrap_or_else(|| self.cursor.resume_index());
        selector::find_unspent_address(
            &self.ledger,
            &self.crypto,
            &self.seed,
            self.security,
            start,
            input_indices,
        )
        .await
    }

    /// Tip selection, bundle construction, PoW, store, broadcast.
    async fn submit_bundle(
        &self,
        mut description: BundleDescription,
    ) -> Result<String, WalletError> {
        let (trunk, branch) = self
            .ledger
            .get_transactions_to_approve(TIP_SELECTION_DEPTH)
            .await?;

        description.timestamp = unix_timestamp();
        debug!(
            "creating bundle with 1 output, {} input(s) and {} change transaction",
            description.inputs.len(),
            if description.change.is_some() { "1" } else { "no" }
        );
        let bundle = self.crypto.build_bundle(&self.seed, &description)?;

        let powered = pow::dispatch(
            &self.ledger,
            self.pow_provider.as_deref(),
            &trunk,
            &branch,
            self.min_weight_magnitude,
            bundle.trytes,
        )
        .await?;

        self.ledger.store_transactions(&powered).await?;
        self.ledger.broadcast_transactions(&powered).await?;
        Ok(bundle.hash)
    }

    fn render_address(
        &self,
        address: Address,
        index: u32,
        with_checksum: bool,
    ) -> Result<ReceiveAddress, WalletError> {
        let rendered = if with_checksum {
            self.crypto.address_with_checksum(&address)?
        } else {
            address.as_trytes().to_string()
        };
        Ok(ReceiveAddress {
            address: rendered,
            index,
            core: address,
        })
    }
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
