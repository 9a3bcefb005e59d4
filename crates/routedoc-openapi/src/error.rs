//! Typed error enum for the `routedoc-openapi` library API.
//!
//! Every error is fatal to a generation run. The CLI (`main.rs`) converts
//! these to `anyhow::Error` at the binary boundary for richer context.

use routedoc_core::{CatalogueError, VersionError};

/// Errors produced by `routedoc-openapi` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (config, catalogue, output documents).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure (config files).
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The route catalogue is malformed or incomplete.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// A route's versioned schema rejected the current API version.
    #[error("route '{route}': cannot resolve {field} schema: {source}")]
    SchemaResolution {
        /// Catalogue key of the route.
        route: String,
        /// Which descriptor field failed (`query`, `params`, `body`, `response`).
        field: &'static str,
        /// The producer's error.
        #[source]
        source: VersionError,
    },

    /// A route's path-parameter schema did not compile to an inline object.
    #[error("route '{route}': path parameters must be an inline object schema")]
    PathParamsNotObject {
        /// Catalogue key of the route.
        route: String,
    },

    /// A rendered operation header names a path or verb missing from the document.
    #[error("rendered operation `{method} {path}` does not exist in the document paths")]
    HarvestTarget {
        /// HTTP verb from the header.
        method: String,
        /// Reconstructed path key.
        path: String,
    },

    /// The markdown renderer failed.
    #[error("markdown renderer failed: {0}")]
    Renderer(String),

    /// The document failed structural validation.
    #[error("invalid OpenAPI document:\n  - {}", .problems.join("\n  - "))]
    InvalidDocument {
        /// Every problem found, in discovery order.
        problems: Vec<String>,
    },
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
