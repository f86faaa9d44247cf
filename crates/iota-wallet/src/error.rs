//! Wallet error types.

use crate::crypto::CryptoError;
use crate::pow::PowError;
use iota_rpc::RpcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("invalid transfer tag: {0}")]
    InvalidTag(String),

    #[error("node communication failed: {0}")]
    Rpc(#[from] RpcError),

    #[error(
        "balance too fragmented: {available} found across {inputs} addresses, \
         need {needed} (more inputs than one bundle can spend)"
    )]
    FragmentedBalance {
        needed: u64,
        available: u64,
        inputs: usize,
    },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("proof of work failed: {0}")]
    Pow(#[from] PowError),

    #[error("bundle memory exhausted: {0}")]
    OutOfMemory(String),

    #[error("crypto backend error: {0}")]
    Crypto(String),
}

impl From<CryptoError> for WalletError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::OutOfMemory(detail) => WalletError::OutOfMemory(detail),
            other => WalletError::Crypto(other.to_string()),
        }
    }
}
