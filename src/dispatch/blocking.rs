//! Synchronous front end for the dispatcher.
//!
//! Owns a small Tokio runtime and drives the async pipeline to completion on
//! the calling thread. Must not be used from inside an async context: Tokio
//! panics when `block_on` is nested in a runtime.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use crate::config::schema::DispatcherConfig;
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::request::{ApiResult, ExecuteOptions, RequestSpec};
use crate::http::transport::{ReqwestTransport, Transport};
use crate::routing::table::RouteTable;

/// Blocking wrapper running the same algorithm as [`Dispatcher`].
#[derive(Debug)]
pub struct BlockingDispatcher<T = ReqwestTransport> {
    inner: Dispatcher<T>,
    runtime: Runtime,
}

impl BlockingDispatcher<ReqwestTransport> {
    /// Load routes and build the client, as [`Dispatcher::from_config`].
    pub fn from_config(config: &DispatcherConfig) -> DispatchResult<Self> {
        Self::from_dispatcher(Dispatcher::from_config(config)?)
    }
}

impl<T: Transport> BlockingDispatcher<T> {
    pub fn with_transport(
        routes: impl Into<Arc<RouteTable>>,
        transport: T,
    ) -> DispatchResult<Self> {
        Self::from_dispatcher(Dispatcher::with_transport(routes, transport))
    }

    /// Wrap an existing async dispatcher.
    pub fn from_dispatcher(inner: Dispatcher<T>) -> DispatchResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("rest-dispatch-blocking")
            .enable_all()
            .build()
            .map_err(DispatchError::Runtime)?;
        Ok(Self { inner, runtime })
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.inner
    }

    pub fn resolve_url(
        &self,
        request_name: &str,
        options: &ExecuteOptions,
    ) -> DispatchResult<String> {
        self.inner.resolve_url(request_name, options)
    }

    /// Run one request, blocking the current thread until it completes.
    pub fn execute<R>(&self, spec: RequestSpec) -> DispatchResult<ApiResult<R>>
    where
        R: DeserializeOwned + Default,
    {
        self.runtime.block_on(self.inner.execute(spec))
    }
}
