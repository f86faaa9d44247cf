//! In-memory fakes for the wallet's trait seams.
#![allow(dead_code)]
//!
//! The ledger fake answers balance/spent-state queries from configured
//! maps and records every call; the crypto fake derives deterministic
//! addresses and records the bundle descriptions it was asked to build.

use async_trait::async_trait;
use iota_rpc::RpcError;
use iota_types::{Address, Bundle, BundleDescription, SecurityLevel, Seed};
use iota_wallet::{CryptoError, CryptoProvider, LedgerClient, PowError, PowProvider};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_seed() -> Seed {
    Seed::from_trytes(&"9".repeat(81)).expect("valid seed")
}

/// The deterministic address the crypto fake derives for an index.
pub fn mock_address(security: SecurityLevel, index: u32) -> Address {
    let prefix = (b'A' + security.as_u8() - 1) as char;
    let mut digits = String::new();
    let mut rest = index;
    loop {
        digits.push((b'A' + (rest % 26) as u8) as char);
        rest /= 26;
        if rest == 0 {
            break;
        }
    }
    let mut trytes = format!("{}{}", prefix, digits);
    while trytes.len() < 81 {
        trytes.push('9');
    }
    Address::from_trytes(&trytes).expect("valid mock address")
}

/// The checksummed rendering the crypto fake produces for an address.
pub fn mock_checksummed(address: &Address) -> String {
    format!("{}{}", address.as_trytes(), &address.as_trytes()[..9])
}

// ─── Ledger fake ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct LedgerState {
    pub balances: HashMap<String, u64>,
    pub spent: HashSet<String>,
    pub txs_by_address: HashMap<String, Vec<String>>,
    pub balance_calls: u32,
    pub spent_calls: u32,
    pub find_calls: u32,
    pub approve_calls: u32,
    pub attach_calls: u32,
    pub stored: Vec<Vec<String>>,
    pub broadcast: Vec<Vec<String>>,
    /// 1-based `get_balances` call number that fails, if any.
    pub fail_balances_on_call: Option<u32>,
    pub fail_attach: bool,
    pub fail_store: bool,
    pub fail_broadcast: bool,
}

#[derive(Default)]
pub struct MockLedger {
    pub state: Mutex<LedgerState>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, address: &Address, balance: u64) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(address.as_trytes().to_string(), balance);
    }

    pub fn mark_spent(&self, address: &Address) {
        self.state
            .lock()
            .unwrap()
            .spent
            .insert(address.as_trytes().to_string());
    }

    pub fn add_transaction(&self, address: &Address, hash: &str) {
        self.state
            .lock()
            .unwrap()
            .txs_by_address
            .entry(address.as_trytes().to_string())
            .or_default()
            .push(hash.to_string());
    }

    fn injected(&self, what: &str) -> RpcError {
        RpcError::Other(format!("injected {} failure", what))
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_balances(&self, addresses: &[Address]) -> Result<Vec<u64>, RpcError> {
        let mut state = self.state.lock().unwrap();
        state.balance_calls += 1;
        if state.fail_balances_on_call == Some(state.balance_calls) {
            return Err(self.injected("balance"));
        }
        Ok(addresses
            .iter()
            .map(|a| state.balances.get(a.as_trytes()).copied().unwrap_or(0))
            .collect())
    }

    async fn were_addresses_spent_from(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<bool>, RpcError> {
        let mut state = self.state.lock().unwrap();
        state.spent_calls += 1;
        Ok(addresses
            .iter()
            .map(|a| state.spent.contains(a.as_trytes()))
            .collect())
    }

    async fn find_transactions(&self, addresses: &[Address]) -> Result<Vec<String>, RpcError> {
        let mut state = self.state.lock().unwrap();
        state.find_calls += 1;
        let mut hashes = Vec::new();
        for address in addresses {
            if let Some(txs) = state.txs_by_address.get(address.as_trytes()) {
                hashes.extend(txs.iter().cloned());
            }
        }
        Ok(hashes)
    }

    async fn get_transactions_to_approve(
        &self,
        _depth: u32,
    ) -> Result<(String, String), RpcError> {
        let mut state = self.state.lock().unwrap();
        state.approve_calls += 1;
        Ok(("T".repeat(81), "B".repeat(81)))
    }

    async fn attach_to_tangle(
        &self,
        _trunk: &str,
        _branch: &str,
        _min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, RpcError> {
        let mut state = self.state.lock().unwrap();
        state.attach_calls += 1;
        if state.fail_attach {
            return Err(self.injected("attach"));
        }
        Ok(trytes.iter().map(|t| format!("{}POW", t)).collect())
    }

    async fn store_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_store {
            return Err(self.injected("store"));
        }
        state.stored.push(trytes.to_vec());
        Ok(())
    }

    async fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_broadcast {
            return Err(self.injected("broadcast"));
        }
        state.broadcast.push(trytes.to_vec());
        Ok(())
    }
}

// ─── Crypto fake ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCrypto {
    pub built: Mutex<Vec<BundleDescription>>,
}

impl MockCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_description(&self) -> BundleDescription {
        self.built
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no bundle was built")
    }
}

impl CryptoProvider for MockCrypto {
    fn derive_address(
        &self,
        _seed: &Seed,
        index: u32,
        security: SecurityLevel,
    ) -> Result<Address, CryptoError> {
        Ok(mock_address(security, index))
    }

    fn build_bundle(
        &self,
        _seed: &Seed,
        description: &BundleDescription,
    ) -> Result<Bundle, CryptoError> {
        description
            .validate()
            .map_err(|e| CryptoError::Backend(e.to_string()))?;
        self.built.lock().unwrap().push(description.clone());

        let count = description.transaction_count();
        let trytes = (0..count)
            .rev()
            .map(|i| format!("RAWTX{}", i))
            .collect();
        Ok(Bundle {
            hash: description.output.address.as_trytes().to_string(),
            trytes,
        })
    }

    fn verify_checksum(&self, address: &str) -> Result<Address, CryptoError> {
        if address.len() != 90 {
            return Err(CryptoError::BadAddressLength(address.len()));
        }
        let core = Address::from_trytes(&address[..81])
            .map_err(|e| CryptoError::Backend(e.to_string()))?;
        if mock_checksummed(&core) != address {
            return Err(CryptoError::ChecksumMismatch);
        }
        Ok(core)
    }

    fn address_with_checksum(&self, address: &Address) -> Result<String, CryptoError> {
        Ok(mock_checksummed(address))
    }
}

// ─── PoW fake ────────────────────────────────────────────────────────────

pub enum PowBehavior {
    Succeed,
    WrongCount,
    Fail,
}

pub struct MockPow {
    pub behavior: PowBehavior,
    pub calls: Mutex<u32>,
}

impl MockPow {
    pub fn new(behavior: PowBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl PowProvider for MockPow {
    async fn perform_pow(
        &self,
        _trunk: &str,
        _branch: &str,
        _min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, PowError> {
        *self.calls.lock().unwrap() += 1;
        match self.behavior {
            PowBehavior::Succeed => {
                Ok(trytes.iter().map(|t| format!("{}EXTPOW", t)).collect())
            }
            PowBehavior::WrongCount => Ok(vec!["JUNK".to_string(); trytes.len() + 1]),
            PowBehavior::Fail => Err(PowError::Provider("no hardware".to_string())),
        }
    }
}
