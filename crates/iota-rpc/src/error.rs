//! Node API error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP error calling {command}: {source}")]
    Http {
        command: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node rejected {command} with status {status}: {reason}")]
    Node {
        command: String,
        status: u16,
        reason: String,
    },

    #[error("authentication failed")]
    AuthFailed,

    #[error("missing field `{field}` in {command} response")]
    MissingField {
        command: String,
        field: &'static str,
    },

    #[error("malformed {command} response: {detail}")]
    Malformed { command: String, detail: String },

    #[error("{0}")]
    Other(String),
}
