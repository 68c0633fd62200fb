//! Configuration schema definitions.
//!
//! Two documents are described here:
//! - the route document (JSON), mapping request names to URL templates;
//! - the dispatcher settings (TOML), carrying timeouts, client identity and
//!   observability switches.
//!
//! All types derive Serde traits. Route document keys are matched
//! case-insensitively by the loader, so the lowercase names below also accept
//! `HttpConfig`, `RequestName`, `URLName` and friends.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default route document file name.
pub const DEFAULT_ROUTES_PATH: &str = "communicationsettings.json";

/// Root of the route document.
///
/// Routes live either under `httpconfig.routes` or directly under a
/// top-level `routes` list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteDocument {
    /// Wrapped form: `{ "HttpConfig": { "routes": [...] } }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub httpconfig: Option<HttpSection>,

    /// Bare form: `{ "routes": [...] }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RouteEntry>>,
}

impl RouteDocument {
    /// Returns true if neither routes section is present.
    pub fn is_missing_routes(&self) -> bool {
        self.httpconfig.is_none() && self.routes.is_none()
    }

    /// Iterate over every entry, wrapped routes first.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.httpconfig
            .iter()
            .flat_map(|section| section.routes.iter())
            .chain(self.routes.iter().flatten())
    }

    /// Consume the document, yielding every entry, wrapped routes first.
    pub fn into_entries(self) -> Vec<RouteEntry> {
        let mut entries = self.httpconfig.map(|s| s.routes).unwrap_or_default();
        entries.extend(self.routes.unwrap_or_default());
        entries
    }
}

/// The `HttpConfig` section of the route document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HttpSection {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One request name to URL template mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteEntry {
    /// Symbolic name callers use instead of a URL.
    pub requestname: String,

    /// URL template with `{key}` and `{0}` style placeholders.
    pub urlname: String,
}

/// Root configuration for a dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Path of the JSON route document.
    pub routes_path: PathBuf,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// HTTP client identity.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            routes_path: PathBuf::from(DEFAULT_ROUTES_PATH),
            timeouts: TimeoutConfig::default(),
            client: ClientConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DispatcherConfig {
    /// Create a config pointing at the given route document.
    pub fn with_routes_path(path: impl Into<PathBuf>) -> Self {
        Self {
            routes_path: path.into(),
            ..Default::default()
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Default whole-request timeout, used when a call has no override.
    pub request_secs: u64,

    /// TCP connect timeout.
    pub connect_secs: u64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 100,
            connect_secs: 10,
        }
    }
}

/// HTTP client identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("rest-dispatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Send the per-call request id as `x-request-id`.
    pub request_id_header: bool,

    /// Record request counters and latency histograms.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            request_id_header: true,
            metrics_enabled: true,
        }
    }
}
