//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher produces:
//!     → logging.rs (structured log events, one span field set per call)
//!     → metrics.rs (request counters, latency histograms, failure counters)
//!
//! Consumers:
//!     → Log output (stdout via tracing-subscriber fmt layer)
//!     → Whatever recorder the host application installs for `metrics`
//! ```
//!
//! # Design Decisions
//! - Request ID (UUID v4) is attached to every log line of a call
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops

pub mod logging;
pub mod metrics;
