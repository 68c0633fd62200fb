//! Dispatch error types.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::http::transport::TransportError;

/// Errors surfaced by a dispatch call. None of them is retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Route or dispatcher configuration missing, unparsable or invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The request name has no entry in the route table.
    #[error("request name '{0}' not found in route table")]
    RouteNotFound(String),

    /// Verb outside GET/POST/PUT/DELETE.
    #[error("unsupported HTTP verb: {0}")]
    UnsupportedVerb(String),

    /// Non-success HTTP status.
    #[error("HTTP request failed with status {status}")]
    Http {
        status: StatusCode,
        body: Option<String>,
    },

    /// Success status but the body is not valid JSON for the target type.
    #[error("failed to deserialize response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request body could not be encoded as JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The blocking dispatcher could not start its runtime.
    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl DispatchError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Configuration(_) => "configuration",
            DispatchError::RouteNotFound(_) => "route_not_found",
            DispatchError::UnsupportedVerb(_) => "unsupported_verb",
            DispatchError::Http { .. } => "http_status",
            DispatchError::Deserialization(_) => "deserialization",
            DispatchError::Serialization(_) => "serialization",
            DispatchError::Transport(TransportError::Timeout) => "timeout",
            DispatchError::Transport(_) => "transport",
            DispatchError::Runtime(_) => "runtime",
        }
    }

    /// HTTP status of an `Http` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DispatchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DispatchError::Transport(TransportError::Timeout))
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
