//! Request execution pipeline.
//!
//! # Responsibilities
//! - Resolve a request name to a URL template
//! - Apply named, then positional, placeholder substitution
//! - Issue exactly one HTTP exchange through the transport
//! - Reject non-2xx statuses, then decode the body into the caller's type
//!
//! # Design Decisions
//! - No retries and no partial results: the first failing step ends the call
//! - The per-call timeout travels with the outbound request
//! - Route table is shared read-only behind an `Arc`

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::schema::{ClientConfig, DispatcherConfig, ObservabilityConfig, TimeoutConfig};
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::request::{ApiResult, ExecuteOptions, RequestSpec};
use crate::http::codec;
use crate::http::transport::{OutboundRequest, ReqwestTransport, Transport};
use crate::http::X_REQUEST_ID;
use crate::observability::metrics;
use crate::routing::table::RouteTable;
use crate::routing::template::{substitute_named, substitute_positional};

/// Resolves request names and executes them over a transport.
#[derive(Debug, Clone)]
pub struct Dispatcher<T = ReqwestTransport> {
    routes: Arc<RouteTable>,
    transport: T,
    observability: ObservabilityConfig,
}

impl Dispatcher<ReqwestTransport> {
    /// Load the route table named by `config` and build the shared client.
    pub fn from_config(config: &DispatcherConfig) -> DispatchResult<Self> {
        let routes = RouteTable::load(&config.routes_path)?;
        let dispatcher = Self::new(routes, &config.client, &config.timeouts)?;
        Ok(dispatcher.with_observability(config.observability.clone()))
    }

    /// Build a dispatcher with a fresh reqwest client.
    pub fn new(
        routes: impl Into<Arc<RouteTable>>,
        client: &ClientConfig,
        timeouts: &TimeoutConfig,
    ) -> DispatchResult<Self> {
        let transport = ReqwestTransport::new(client, timeouts)?;
        Ok(Self::with_transport(routes, transport))
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Build a dispatcher over any transport.
    pub fn with_transport(routes: impl Into<Arc<RouteTable>>, transport: T) -> Self {
        Self {
            routes: routes.into(),
            transport,
            observability: ObservabilityConfig::default(),
        }
    }

    #[must_use]
    pub fn with_observability(mut self, observability: ObservabilityConfig) -> Self {
        self.observability = observability;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve and template a URL without any I/O.
    pub fn resolve_url(
        &self,
        request_name: &str,
        options: &ExecuteOptions,
    ) -> DispatchResult<String> {
        let template = self.routes.resolve(request_name)?;
        let named = substitute_named(template, &options.parameters);
        Ok(substitute_positional(&named, &options.args))
    }

    /// Run one request and decode its body into `R`.
    pub async fn execute<R>(&self, spec: RequestSpec) -> DispatchResult<ApiResult<R>>
    where
        R: DeserializeOwned + Default,
    {
        let request_id = Uuid::new_v4().to_string();
        let result = self.run(&request_id, &spec).await;

        if let Err(err) = &result {
            tracing::warn!(
                request_id = %request_id,
                request_name = %spec.request_name,
                verb = %spec.verb,
                kind = err.kind(),
                error = %err,
                "Request failed"
            );
            if self.observability.metrics_enabled {
                metrics::record_failure(&spec.request_name, err.kind());
            }
        }

        result
    }

    async fn run<R>(&self, request_id: &str, spec: &RequestSpec) -> DispatchResult<ApiResult<R>>
    where
        R: DeserializeOwned + Default,
    {
        let url = self.resolve_url(&spec.request_name, &spec.options)?;

        let mut request = OutboundRequest::new(spec.verb, url);
        request.timeout = spec.options.timeout;

        if spec.verb.carries_body() {
            if let Some(body) = &spec.body {
                request.body = codec::encode_body(body).map_err(DispatchError::Serialization)?;
            }
        }

        if self.observability.request_id_header {
            request
                .headers
                .push((X_REQUEST_ID.to_string(), request_id.to_string()));
        }

        tracing::debug!(
            request_id = %request_id,
            request_name = %spec.request_name,
            verb = %spec.verb,
            url = %request.url,
            has_body = request.body.is_some(),
            timeout_ms = request.timeout.map(|t| t.as_millis() as u64),
            "Dispatching request"
        );

        let start_time = Instant::now();
        let response = self.transport.send(request).await?;

        tracing::debug!(
            request_id = %request_id,
            status = response.status.as_u16(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            body_len = response.body.len(),
            "Response received"
        );

        if self.observability.metrics_enabled {
            metrics::record_request(
                &spec.request_name,
                spec.verb.as_str(),
                response.status.as_u16(),
                start_time,
            );
        }

        if !response.status.is_success() {
            let body = (!response.body.is_empty()).then_some(response.body);
            return Err(DispatchError::Http {
                status: response.status,
                body,
            });
        }

        let data = codec::decode_response(&response.body).map_err(DispatchError::Deserialization)?;
        Ok(ApiResult::new(data, response.status))
    }
}
