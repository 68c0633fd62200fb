//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route document (JSON)              dispatcher settings (TOML)
//!     → loader.rs (parse, case-insensitive keys)   → loader.rs (parse)
//!     → validation.rs (semantic checks)            → validation.rs
//!     → RouteDocument                              → DispatcherConfig
//!     → routing::RouteTable (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Documents are parsed into typed structs once, at startup
//! - All settings fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_dispatcher_config, load_route_document, parse_route_document, ConfigError};
pub use schema::{
    ClientConfig, DispatcherConfig, ObservabilityConfig, RouteDocument, RouteEntry, TimeoutConfig,
};
pub use validation::ValidationError;
