//! Ledger node seam.
//!
//! [`LedgerClient`] covers exactly the node operations the engine consumes.
//! The production implementation is [`iota_rpc::NodeClient`]; tests use
//! in-memory fakes. Every method is a single blocking request/response with
//! no internal retry.

use async_trait::async_trait;
use iota_rpc::node::FindTransactions;
use iota_rpc::{NodeClient, RpcError};
use iota_types::Address;

#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Confirmed balance of each address, in request order.
    async fn get_balances(&self, addresses: &[Address]) -> Result<Vec<u64>, RpcError>;

    /// Whether each address has ever been spent from, in request order.
    async fn were_addresses_spent_from(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<bool>, RpcError>;

    /// Hashes of transactions containing any of the given addresses.
    async fn find_transactions(&self, addresses: &[Address]) -> Result<Vec<String>, RpcError>;

    /// Two tip transactions (trunk, branch) for a new bundle to approve.
    async fn get_transactions_to_approve(&self, depth: u32)
        -> Result<(String, String), RpcError>;

    /// Delegate Proof of Work to the node.
    async fn attach_to_tangle(
        &self,
        trunk: &str,
        branch: &str,
        min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, RpcError>;

    /// Store powered transactions on the node.
    async fn store_transactions(&self, trytes: &[String]) -> Result<(), RpcError>;

    /// Broadcast powered transactions to the node's neighbors.
    async fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), RpcError>;
}

#[async_trait]
impl<'a, T: LedgerClient + ?Sized> LedgerClient for &'a T {
    async fn get_balances(&self, addresses: &[Address]) -> Result<Vec<u64>, RpcError> {
        (**self).get_balances(addresses).await
    }

    async fn were_addresses_spent_from(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<bool>, RpcError> {
        (**self).were_addresses_spent_from(addresses).await
    }

    async fn find_transactions(&self, addresses: &[Address]) -> Result<Vec<String>, RpcError> {
        (**self).find_transactions(addresses).await
    }

    async fn get_transactions_to_approve(
        &self,
        depth: u32,
    ) -> Result<(String, String), RpcError> {
        (**self).get_transactions_to_approve(depth).await
    }

    async fn attach_to_tangle(
        &self,
        trunk: &str,
        branch: &str,
        min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, RpcError> {
        (**self)
            .attach_to_tangle(trunk, branch, min_weight_magnitude, trytes)
            .await
    }

    async fn store_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        (**self).store_transactions(trytes).await
    }

    async fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        (**self).broadcast_transactions(trytes).await
    }
}

#[async_trait]
impl LedgerClient for NodeClient {
    async fn get_balances(&self, addresses: &[Address]) -> Result<Vec<u64>, RpcError> {
        NodeClient::get_balances(self, addresses).await
    }

    async fn were_addresses_spent_from(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<bool>, RpcError> {
        NodeClient::were_addresses_spent_from(self, addresses).await
    }

    async fn find_transactions(&self, addresses: &[Address]) -> Result<Vec<String>, RpcError> {
        let filter = FindTransactions {
            addresses: addresses.to_vec(),
            ..Default::default()
        };
        NodeClient::find_transactions(self, &filter).await
    }

    async fn get_transactions_to_approve(
        &self,
        depth: u32,
    ) -> Result<(String, String), RpcError> {
        let tips = NodeClient::get_transactions_to_approve(self, depth).await?;
        Ok((tips.trunk_transaction, tips.branch_transaction))
    }

    async fn attach_to_tangle(
        &self,
        trunk: &str,
        branch: &str,
        min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, RpcError> {
        NodeClient::attach_to_tangle(self, trunk, branch, min_weight_magnitude, trytes).await
    }

    async fn store_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        NodeClient::store_transactions(self, trytes).await
    }

    async fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        NodeClient::broadcast_transactions(self, trytes).await
    }
}
