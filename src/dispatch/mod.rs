//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! RequestSpec { name, verb, body, options }
//!     → routing::table (name → URL template)
//!     → routing::template (named, then positional substitution)
//!     → http::transport (one exchange, per-call timeout)
//!     → status check (non-2xx → DispatchError::Http)
//!     → http::codec (case-insensitive decode → T)
//!     → ApiResult<T>
//! ```
//!
//! `Dispatcher` is the async entry point; `BlockingDispatcher` drives the
//! same pipeline on an owned runtime for synchronous callers.

pub mod blocking;
pub mod dispatcher;
pub mod error;
pub mod request;

pub use blocking::BlockingDispatcher;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use request::{ApiResult, ExecuteOptions, RequestSpec};
