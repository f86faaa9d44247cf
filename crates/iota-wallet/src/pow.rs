//! Proof-of-Work dispatch.
//!
//! A bundle's transactions need PoW before they can be stored and
//! broadcast. By default the work is delegated to the ledger node's attach
//! operation; callers with their own hardware or outsourced PoW can inject
//! a [`PowProvider`] instead. The two paths fail differently on purpose: a
//! provider failure is attributable to the caller-supplied implementation,
//! while a node-side failure is a transient network error the caller may
//! retry.

use crate::error::WalletError;
use crate::ledger::LedgerClient;
use async_trait::async_trait;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowError {
    #[error("provider failed: {0}")]
    Provider(String),

    #[error("provider returned {actual} transactions, expected {expected}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Externally-implemented Proof of Work.
#[async_trait]
pub trait PowProvider: Send + Sync {
    /// Perform PoW on a bundle's raw transactions, chaining them to the
    /// given trunk and branch references. Must return the same number of
    /// transactions it was given, now carrying valid nonces.
    async fn perform_pow(
        &self,
        trunk: &str,
        branch: &str,
        min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, PowError>;
}

#[async_trait]
impl<T: PowProvider + ?Sized> PowProvider for std::sync::Arc<T> {
    async fn perform_pow(
        &self,
        trunk: &str,
        branch: &str,
        min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, PowError> {
        (**self)
            .perform_pow(trunk, branch, min_weight_magnitude, trytes)
            .await
    }
}

/// Route a bundle through the configured PoW path.
pub(crate) async fn dispatch<L: LedgerClient + ?Sized>(
    ledger: &L,
    provider: Option<&dyn PowProvider>,
    trunk: &str,
    branch: &str,
    min_weight_magnitude: u32,
    trytes: Vec<String>,
) -> Result<Vec<String>, WalletError> {
    match provider {
        Some(pow) => {
            debug!("using external PoW provider for {} transaction(s)", trytes.len());
            let expected = trytes.len();
            let powered = pow
                .perform_pow(trunk, branch, min_weight_magnitude, &trytes)
                .await?;
            if powered.len() != expected {
                return Err(WalletError::Pow(PowError::CountMismatch {
                    expected,
                    actual: powered.len(),
                }));
            }
            Ok(powered)
        }
        None => {
            debug!("delegating PoW to the node for {} transaction(s)", trytes.len());
            let powered = ledger
                .attach_to_tangle(trunk, branch, min_weight_magnitude, &trytes)
                .await?;
            Ok(powered)
        }
    }
}
