//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! resolved URL + Verb + optional JSON body
//!     → codec.rs (body → UTF-8 JSON text, POST/PUT only)
//!     → transport.rs (one exchange on the shared client)
//!     → TransportResponse (status + raw body)
//!     → codec.rs (case-insensitive JSON → T)
//! ```

pub mod codec;
pub mod transport;
pub mod verb;

pub use transport::{
    OutboundRequest, ReqwestTransport, Transport, TransportError, TransportResponse,
};
pub use verb::Verb;

/// Header carrying the per-call correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";
