#![allow(clippy::doc_markdown)] // README uses "OpenAPI" proper noun throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalogue;
mod descriptor;
mod error;
mod schema;

pub use catalogue::{RouteCatalogue, RouterMount};
pub use descriptor::{Method, Right, RouteDescriptor, SchemaSource, VersionedSchema, VersionedVariant};
pub use error::{CatalogueError, VersionError};
pub use schema::{Schema, SchemaKind};
