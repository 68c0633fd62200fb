//! Route lookup.
//!
//! # Responsibilities
//! - Store the routes loaded from the route document
//! - Look up the URL template for a request name
//! - Return the template or an explicit not-found error
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via a name → position index
//! - First entry wins when a name appears more than once
//! - Names are matched exactly (case-sensitive)

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use crate::config::loader::{load_route_document, parse_route_document};
use crate::config::schema::{RouteDocument, RouteEntry};
use crate::dispatch::error::{DispatchError, DispatchResult};

/// A request name paired with its URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub request_name: String,
    pub url_template: String,
}

impl Route {
    pub fn new(request_name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            request_name: request_name.into(),
            url_template: url_template.into(),
        }
    }
}

impl From<RouteEntry> for Route {
    fn from(entry: RouteEntry) -> Self {
        Self::new(entry.requestname, entry.urlname)
    }
}

/// Immutable request-name → URL-template table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Load the table from a JSON route document on disk.
    pub fn load(path: impl AsRef<Path>) -> DispatchResult<Self> {
        let path = path.as_ref();
        let table = Self::from_document(load_route_document(path)?);
        tracing::info!(path = %path.display(), routes = table.len(), "Route table loaded");
        Ok(table)
    }

    /// Build the table from JSON text.
    pub fn from_json(content: &str) -> DispatchResult<Self> {
        Ok(Self::from_document(parse_route_document(content)?))
    }

    /// Build the table from an already parsed document.
    pub fn from_document(doc: RouteDocument) -> Self {
        Self::from_routes(doc.into_entries().into_iter().map(Route::from))
    }

    /// Build the table from routes in precedence order.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let routes: Vec<Route> = routes.into_iter().collect();
        let mut index = HashMap::with_capacity(routes.len());

        for (position, route) in routes.iter().enumerate() {
            match index.entry(route.request_name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(first) => {
                    tracing::warn!(
                        request_name = %route.request_name,
                        kept = %routes[*first.get()].url_template,
                        ignored = %route.url_template,
                        "Duplicate request name, first entry wins"
                    );
                }
            }
        }

        Self { routes, index }
    }

    /// Return the URL template registered for `request_name`.
    pub fn resolve(&self, request_name: &str) -> DispatchResult<&str> {
        self.index
            .get(request_name)
            .map(|&position| self.routes[position].url_template.as_str())
            .ok_or_else(|| DispatchError::RouteNotFound(request_name.to_string()))
    }

    pub fn contains(&self, request_name: &str) -> bool {
        self.index.contains_key(request_name)
    }

    /// Number of routes, duplicates included.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
