//! IOTA wallet engine.
//!
//! Discovers funds controlled by a deterministic seed, selects spendable
//! inputs, and assembles signed transfer bundles, returning any remainder
//! to a freshly found change address. The ledger node, the cryptographic
//! backend, and Proof of Work are consumed through trait seams
//! ([`LedgerClient`], [`CryptoProvider`], [`PowProvider`]).

pub mod crypto;
pub mod cursor;
pub mod error;
pub mod ledger;
pub mod pow;
pub mod scanner;
pub mod selector;
pub mod transfer;
pub mod wallet;

pub use crypto::{CryptoError, CryptoProvider};
pub use cursor::ScanCursor;
pub use error::WalletError;
pub use ledger::LedgerClient;
pub use pow::{PowError, PowProvider};
pub use scanner::{AddressBalance, BalanceScan, ScanOptions, SCAN_BATCH_SIZE};
pub use selector::UnspentAddress;
pub use transfer::{Balance, ReceiveAddress, TransferReceipt, TransferRequest};
pub use wallet::Wallet;
