//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! request name + ExecuteOptions
//!     → table.rs (name → URL template)
//!     → template.rs (named `{key}` pass, then positional `{0}` pass)
//!     → concrete URL
//!
//! Table construction (at startup):
//!     RouteDocument
//!     → document order preserved
//!     → name index, first entry wins
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes loaded at startup, immutable at runtime
//! - Deterministic: same inputs always resolve to the same URL
//! - No regex; templates are scanned once per pass

pub mod table;
pub mod template;

pub use table::{Route, RouteTable};
pub use template::{substitute_named, substitute_positional};
