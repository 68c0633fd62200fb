//! Metrics collection.
//!
//! # Metrics
//! - `rest_dispatch_requests_total` (counter): completed exchanges by route, verb, status
//! - `rest_dispatch_request_duration_seconds` (histogram): exchange latency by route, verb
//! - `rest_dispatch_failures_total` (counter): failed calls by route, error kind
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade so the host picks the exporter
//! - Labels are route name, never the resolved URL (bounded cardinality)

use std::time::Instant;

pub const REQUESTS_TOTAL: &str = "rest_dispatch_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "rest_dispatch_request_duration_seconds";
pub const FAILURES_TOTAL: &str = "rest_dispatch_failures_total";

/// Record one completed HTTP exchange, whatever its status.
pub fn record_request(route: &str, verb: &str, status: u16, start_time: Instant) {
    let elapsed = start_time.elapsed().as_secs_f64();

    metrics::counter!(
        REQUESTS_TOTAL,
        "route" => route.to_string(),
        "verb" => verb.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        REQUEST_DURATION_SECONDS,
        "route" => route.to_string(),
        "verb" => verb.to_string()
    )
    .record(elapsed);
}

/// Record a failed call by error kind.
pub fn record_failure(route: &str, kind: &'static str) {
    metrics::counter!(FAILURES_TOTAL, "route" => route.to_string(), "kind" => kind).increment(1);
}
