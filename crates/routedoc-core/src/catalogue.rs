//! The route catalogue: routers, their mount paths, and their descriptors.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::descriptor::RouteDescriptor;
use crate::error::CatalogueError;

/// Where a router is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RouterMount {
    /// First path segment of every route in the router (e.g. `device`).
    /// Doubles as the router's documentation tag.
    pub router_path: String,
}

/// Every route of an API, grouped by router.
///
/// Routers and routes keep their declaration order; that order decides tag
/// order, path order and which of two same-named components is kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RouteCatalogue {
    /// Router name → mount record.
    #[serde(default)]
    pub mounts: IndexMap<String, RouterMount>,

    /// Router name → operation name → descriptor.
    #[serde(default)]
    pub routes: IndexMap<String, IndexMap<String, RouteDescriptor>>,
}

impl RouteCatalogue {
    /// An empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalogue file. `.json` files are read as JSON, everything
    /// else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse a YAML catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalogue.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogueError> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Register a router under `router_path`.
    #[must_use]
    pub fn with_router(mut self, router: &str, router_path: &str) -> Self {
        self.mounts.insert(
            router.to_string(),
            RouterMount {
                router_path: router_path.to_string(),
            },
        );
        self
    }

    /// Add a named route to a router.
    #[must_use]
    pub fn with_route(mut self, router: &str, name: &str, route: RouteDescriptor) -> Self {
        self.routes
            .entry(router.to_string())
            .or_default()
            .insert(name.to_string(), route);
        self
    }

    /// Mount record of `router`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::UnknownRouter`] if the router has no mount.
    pub fn mount(&self, router: &str) -> Result<&RouterMount, CatalogueError> {
        self.mounts
            .get(router)
            .ok_or_else(|| CatalogueError::UnknownRouter {
                router: router.to_string(),
            })
    }

    /// Total number of routes across all routers.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.values().map(IndexMap::len).sum()
    }
}
