//! Outbound HTTP transport.
//!
//! # Responsibilities
//! - Define the "send method/URL/body/timeout, receive status/body" seam
//! - Provide the production implementation on one long-lived reqwest client
//! - Map client failures (bad URL, connect, timeout) to `TransportError`
//!
//! # Design Decisions
//! - The per-call timeout rides on the request, never on the shared client,
//!   so concurrent calls cannot observe each other's deadline
//! - The transport does not judge status codes; the dispatcher does
//! - Trait-based so tests can swap in a recording mock

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::schema::{ClientConfig, TimeoutConfig};
use crate::http::codec::JSON_CONTENT_TYPE;
use crate::http::verb::Verb;

/// Errors raised while talking to the remote endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Request(err)
        }
    }
}

/// A fully resolved request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub verb: Verb,
    pub url: String,
    /// UTF-8 JSON text; only ever set for POST and PUT.
    pub body: Option<String>,
    /// Per-call deadline; `None` uses the client default.
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl OutboundRequest {
    pub fn new(verb: Verb, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            body: None,
            timeout: None,
            headers: Vec::new(),
        }
    }

    /// Return the value of a header, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Anything that can perform one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Production transport backed by a single shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the shared client from configuration.
    pub fn new(
        client_config: &ClientConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .user_agent(&client_config.user_agent)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let url = request
            .url
            .parse::<url::Url>()
            .map_err(|e| TransportError::InvalidUrl {
                url: request.url.clone(),
                reason: e.to_string(),
            })?;

        let mut builder = self.client.request(request.verb.method(), url);

        for (name, value) in &request.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            builder = builder.header(header_name, header_value);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        // An error status stands on its own; its body is best effort.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                tracing::debug!(
                    status = status.as_u16(),
                    error = %e,
                    "Error response body unreadable, dropping it"
                );
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(TransportResponse { status, body })
    }
}
