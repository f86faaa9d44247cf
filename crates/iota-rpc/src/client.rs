//! Low-level node API HTTP client.
//!
//! Every node command is a POST of a JSON object carrying a `command` field
//! to the node's root path, with the `X-IOTA-API-Version` header set.
//! Supports Basic auth and a configurable timeout. Requests are never
//! retried here: callers own retry policy.

use crate::error::RpcError;
use base64::Engine;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-iota-api-version");
const API_VERSION: &str = "1";

/// Configuration for a node API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Node URL (e.g., `http://localhost:14265`).
    pub url: String,
    /// Optional username for Basic auth.
    pub username: Option<String>,
    /// Optional password for Basic auth.
    pub password: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:14265".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Async HTTP client for the node command API.
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new client for the given node URL.
    pub fn new(url: &str) -> Self {
        Self::with_config(ApiConfig {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to create HTTP client");

        Self { client, config }
    }

    /// Get the configured node URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn auth_header(&self) -> Option<HeaderValue> {
        match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) => {
                let creds = format!("{}:{}", user, pass);
                let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
                HeaderValue::from_str(&format!("Basic {}", encoded)).ok()
            }
            _ => None,
        }
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        if let Some(auth) = self.auth_header() {
            headers.insert(AUTHORIZATION, auth);
        }
        headers
    }

    /// Execute one node command. `body` must contain the `command` field.
    pub async fn call(&self, body: &Value) -> Result<Value, RpcError> {
        let command = command_name(body);

        let resp = self
            .client
            .post(&self.config.url)
            .headers(self.build_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                command: command.clone(),
                source: e,
            })?;

        let status = resp.status().as_u16();
        debug!("{} -> HTTP {}", command, status);

        if status == 401 {
            return Err(RpcError::AuthFailed);
        }

        if status >= 400 {
            let reason = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| error_reason(&v))
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(RpcError::Node {
                command,
                status,
                reason,
            });
        }

        let val: Value = resp.json().await.map_err(|e| RpcError::Http {
            command: command.clone(),
            source: e,
        })?;

        // Some nodes report errors with a success status.
        if let Some(reason) = error_reason(&val) {
            return Err(RpcError::Node {
                command,
                status,
                reason,
            });
        }

        Ok(val)
    }

    /// Simple connectivity check.
    pub async fn is_connected(&self) -> bool {
        self.call(&serde_json::json!({ "command": "getNodeInfo" }))
            .await
            .is_ok()
    }
}

fn command_name(body: &Value) -> String {
    body.get("command")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>")
        .to_string()
}

fn error_reason(body: &Value) -> Option<String> {
    body.get("error")
        .or_else(|| body.get("exception"))
        .and_then(|v| v.as_str())
        .map(|s| s.chars().take(500).collect())
}
