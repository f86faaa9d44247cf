//! Full-node API client.
//!
//! Typed async methods for the node commands the wallet consumes: balance
//! and spent-state queries, transaction lookup, tip selection, PoW
//! delegation, and transaction storage/broadcast.

use crate::client::{ApiClient, ApiConfig};
use crate::error::RpcError;
use iota_types::transaction::ParsedTransaction;
use iota_types::Address;
use serde::Deserialize;
use serde_json::{json, Value};

// =============================================================================
// Response Types
// =============================================================================

/// `getNodeInfo` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub latest_milestone: String,
    #[serde(default)]
    pub latest_milestone_index: u64,
    #[serde(default)]
    pub latest_solid_subtangle_milestone: String,
    #[serde(default)]
    pub latest_solid_subtangle_milestone_index: u64,
    #[serde(default)]
    pub neighbors: u32,
    #[serde(default)]
    pub tips: u64,
    #[serde(default)]
    pub transactions_to_request: u64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub coordinator_address: String,
    /// Catch-all for additional fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `getTransactionsToApprove` response: the two prior transactions a new
/// bundle must approve.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsToApprove {
    pub trunk_transaction: String,
    pub branch_transaction: String,
}

/// Filter lists for `findTransactions`. Empty lists are omitted from the
/// request body; at least one list must be non-empty.
#[derive(Debug, Clone, Default)]
pub struct FindTransactions {
    pub addresses: Vec<Address>,
    pub bundles: Vec<String>,
    pub tags: Vec<String>,
    pub approvees: Vec<String>,
}

// =============================================================================
// Client
// =============================================================================

/// Typed client for a full node.
pub struct NodeClient {
    client: ApiClient,
}

impl NodeClient {
    /// Create a node client connected to the given URL.
    pub fn new(url: &str) -> Self {
        Self {
            client: ApiClient::new(url),
        }
    }

    /// Create with full configuration.
    pub fn with_config(config: ApiConfig) -> Self {
        Self {
            client: ApiClient::with_config(config),
        }
    }

    /// Get the underlying API client for custom commands.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // =========================================================================
    // Node Information
    // =========================================================================

    /// Get node info (versions, milestones, neighbors).
    pub async fn get_node_info(&self) -> Result<NodeInfo, RpcError> {
        let val = self.client.call(&json!({ "command": "getNodeInfo" })).await?;
        Ok(serde_json::from_value(val)?)
    }

    // =========================================================================
    // Address Queries
    // =========================================================================

    /// Get the confirmed balance of each address.
    pub async fn get_balances(&self, addresses: &[Address]) -> Result<Vec<u64>, RpcError> {
        let val = self
            .client
            .call(&json!({
                "command": "getBalances",
                "addresses": tryte_list(addresses),
                "threshold": 100,
            }))
            .await?;
        parse_balances("getBalances", &val, addresses.len())
    }

    /// Check whether each address has ever been spent from.
    pub async fn were_addresses_spent_from(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<bool>, RpcError> {
        let val = self
            .client
            .call(&json!({
                "command": "wereAddressesSpentFrom",
                "addresses": tryte_list(addresses),
            }))
            .await?;
        parse_states("wereAddressesSpentFrom", &val, addresses.len())
    }

    // =========================================================================
    // Transaction Queries
    // =========================================================================

    /// Find hashes of transactions matching the given filters.
    pub async fn find_transactions(
        &self,
        filter: &FindTransactions,
    ) -> Result<Vec<String>, RpcError> {
        let mut body = json!({ "command": "findTransactions" });
        if !filter.addresses.is_empty() {
            body["addresses"] = json!(tryte_list(&filter.addresses));
        }
        if !filter.bundles.is_empty() {
            body["bundles"] = json!(filter.bundles);
        }
        if !filter.tags.is_empty() {
            body["tags"] = json!(filter.tags);
        }
        if !filter.approvees.is_empty() {
            body["approvees"] = json!(filter.approvees);
        }

        let val = self.client.call(&body).await?;
        string_array("findTransactions", &val, "hashes")
    }

    /// Get the raw trytes of each transaction hash.
    pub async fn get_trytes(&self, hashes: &[&str]) -> Result<Vec<String>, RpcError> {
        let val = self
            .client
            .call(&json!({ "command": "getTrytes", "hashes": hashes }))
            .await?;
        string_array("getTrytes", &val, "trytes")
    }

    /// Fetch and decode one transaction.
    pub async fn get_transaction(&self, hash: &str) -> Result<ParsedTransaction, RpcError> {
        let trytes = self.get_trytes(&[hash]).await?;
        let raw = trytes.first().ok_or(RpcError::MissingField {
            command: "getTrytes".to_string(),
            field: "trytes",
        })?;
        ParsedTransaction::from_trytes(raw).map_err(|e| RpcError::Malformed {
            command: "getTrytes".to_string(),
            detail: e.to_string(),
        })
    }

    // =========================================================================
    // Bundle Attachment
    // =========================================================================

    /// Get two tip transactions for a new bundle to approve.
    pub async fn get_transactions_to_approve(
        &self,
        depth: u32,
    ) -> Result<TransactionsToApprove, RpcError> {
        let val = self
            .client
            .call(&json!({ "command": "getTransactionsToApprove", "depth": depth }))
            .await?;
        Ok(serde_json::from_value(val)?)
    }

    /// Perform Proof of Work on the node and return the powered trytes.
    pub async fn attach_to_tangle(
        &self,
        trunk: &str,
        branch: &str,
        min_weight_magnitude: u32,
        trytes: &[String],
    ) -> Result<Vec<String>, RpcError> {
        let val = self
            .client
            .call(&json!({
                "command": "attachToTangle",
                "trunkTransaction": trunk,
                "branchTransaction": branch,
                "minWeightMagnitude": min_weight_magnitude,
                "trytes": trytes,
            }))
            .await?;
        string_array("attachToTangle", &val, "trytes")
    }

    /// Store powered transactions on the node.
    pub async fn store_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        self.client
            .call(&json!({ "command": "storeTransactions", "trytes": trytes }))
            .await?;
        Ok(())
    }

    /// Broadcast powered transactions to the node's neighbors.
    pub async fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), RpcError> {
        self.client
            .call(&json!({ "command": "broadcastTransactions", "trytes": trytes }))
            .await?;
        Ok(())
    }
}

// =============================================================================
// Response Parsing
// =============================================================================

fn tryte_list(addresses: &[Address]) -> Vec<&str> {
    addresses.iter().map(|a| a.as_trytes()).collect()
}

fn expect_array<'a>(
    command: &str,
    val: &'a Value,
    field: &'static str,
) -> Result<&'a Vec<Value>, RpcError> {
    val.get(field)
        .and_then(|v| v.as_array())
        .ok_or(RpcError::MissingField {
            command: command.to_string(),
            field,
        })
}

fn arity_check(command: &str, actual: usize, expected: usize) -> Result<(), RpcError> {
    if actual != expected {
        return Err(RpcError::Malformed {
            command: command.to_string(),
            detail: format!("expected {} entries, got {}", expected, actual),
        });
    }
    Ok(())
}

/// Balances come back as decimal strings; tolerate plain numbers too.
fn parse_balances(command: &str, val: &Value, expected: usize) -> Result<Vec<u64>, RpcError> {
    let entries = expect_array(command, val, "balances")?;
    arity_check(command, entries.len(), expected)?;
    entries
        .iter()
        .map(|v| {
            v.as_str()
                .and_then(|s| s.parse::<u64>().ok())
                .or_else(|| v.as_u64())
                .ok_or_else(|| RpcError::Malformed {
                    command: command.to_string(),
                    detail: format!("unparseable balance {}", v),
                })
        })
        .collect()
}

fn parse_states(command: &str, val: &Value, expected: usize) -> Result<Vec<bool>, RpcError> {
    let entries = expect_array(command, val, "states")?;
    arity_check(command, entries.len(), expected)?;
    entries
        .iter()
        .map(|v| {
            v.as_bool().ok_or_else(|| RpcError::Malformed {
                command: command.to_string(),
                detail: format!("unparseable spent state {}", v),
            })
        })
        .collect()
}

fn string_array(command: &str, val: &Value, field: &'static str) -> Result<Vec<String>, RpcError> {
    let entries = expect_array(command, val, field)?;
    entries
        .iter()
        .map(|v| {
            v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                RpcError::Malformed {
                    command: command.to_string(),
                    detail: format!("non-string entry in `{}`", field),
                }
            })
        })
        .collect()
}
