//! Configuration-driven REST request dispatcher.
//!
//! Callers name an outbound call (`"getUser"`) instead of a URL; the
//! dispatcher looks the name up in a route table loaded from JSON, fills in
//! `{key}` and `{0}` placeholders, performs the HTTP exchange and decodes the
//! response into the caller's type together with the status code.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::DispatcherConfig;
pub use dispatch::{
    ApiResult, BlockingDispatcher, DispatchError, DispatchResult, Dispatcher, ExecuteOptions,
    RequestSpec,
};
pub use http::{Transport, Verb};
pub use routing::{Route, RouteTable};
