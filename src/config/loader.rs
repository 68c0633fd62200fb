//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{DispatcherConfig, RouteDocument};
use crate::config::validation::{validate_dispatcher_config, validate_routes, ValidationError};
use crate::http::codec;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed route document: {0}")]
    Json(#[source] serde_json::Error),

    #[error("malformed dispatcher config: {0}")]
    Toml(#[source] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a route document from JSON text.
///
/// Keys are matched case-insensitively, so `HttpConfig`/`RequestName`/`UrlName`
/// and `httpconfig`/`requestname`/`urlname` documents load the same way.
pub fn parse_route_document(content: &str) -> Result<RouteDocument, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(ConfigError::Json)?;
    let doc: RouteDocument =
        codec::from_value_case_insensitive(value).map_err(ConfigError::Json)?;

    validate_routes(&doc).map_err(ConfigError::Validation)?;

    Ok(doc)
}

/// Load and validate a route document from a JSON file.
pub fn load_route_document(path: &Path) -> Result<RouteDocument, ConfigError> {
    let content = read_file(path)?;
    parse_route_document(&content)
}

/// Load and validate dispatcher settings from a TOML file.
pub fn load_dispatcher_config(path: &Path) -> Result<DispatcherConfig, ConfigError> {
    let content = read_file(path)?;
    let config: DispatcherConfig = toml::from_str(&content).map_err(ConfigError::Toml)?;

    validate_dispatcher_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
