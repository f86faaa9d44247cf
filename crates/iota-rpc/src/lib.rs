//! IOTA node API client library.
//!
//! Provides an async HTTP client for the IOTA full-node command API: a
//! single-endpoint JSON protocol where every request is a POST carrying a
//! `command` discriminator and the `X-IOTA-API-Version` header.
//!
//! # Example
//!
//! ```ignore
//! use iota_rpc::NodeClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let node = NodeClient::new("https://nodes.thetangle.org:443");
//!     let info = node.get_node_info().await.unwrap();
//!     println!("Milestone: {}", info.latest_milestone_index);
//! }
//! ```

pub mod client;
pub mod error;
pub mod node;

pub use client::{ApiClient, ApiConfig};
pub use error::RpcError;
pub use node::NodeClient;

/// Well-known public full nodes.
pub mod well_known {
    pub const MAINNET: &[&str] = &[
        "https://nodes.iota.org:443",
        "https://nodes.thetangle.org:443",
    ];
    pub const DEVNET: &[&str] = &["https://nodes.devnet.iota.org:443"];
}

/// Default API port of a full node.
pub const DEFAULT_API_PORT: u16 = 14265;
