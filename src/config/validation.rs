//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route has a name and a non-empty template
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the parsed document
//! - Duplicate request names are not errors; first entry wins at lookup

use thiserror::Error;

use crate::config::schema::{DispatcherConfig, RouteDocument};

/// A single semantic problem found in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route document has no `HttpConfig.routes` or `routes` section")]
    MissingRoutes,

    #[error("route #{index} has an empty request name")]
    EmptyRequestName { index: usize },

    #[error("route '{name}' has an empty URL template")]
    EmptyUrlTemplate { name: String },

    #[error("routes_path cannot be empty")]
    EmptyRoutesPath,

    #[error("timeout '{field}' must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate a parsed route document.
pub fn validate_routes(doc: &RouteDocument) -> Result<(), Vec<ValidationError>> {
    if doc.is_missing_routes() {
        return Err(vec![ValidationError::MissingRoutes]);
    }

    let mut errors = Vec::new();
    for (index, entry) in doc.entries().enumerate() {
        if entry.requestname.trim().is_empty() {
            errors.push(ValidationError::EmptyRequestName { index });
            continue;
        }

        if entry.urlname.trim().is_empty() {
            errors.push(ValidationError::EmptyUrlTemplate {
                name: entry.requestname.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate dispatcher settings.
pub fn validate_dispatcher_config(config: &DispatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyRoutesPath);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "request_secs" });
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "connect_secs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
