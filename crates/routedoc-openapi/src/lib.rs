#![allow(clippy::doc_markdown)] // README uses "OpenAPI" proper noun throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod compose;
mod config;
mod error;
mod finalize;
mod generate;
mod harvest;
mod helpers;
mod operation;
mod paths;
mod registry;
mod render;
mod resolve;
mod validate;

/// Media type of every request and response body.
pub const MEDIA_TYPE: &str = "text/json";

/// `OpenAPI` version emitted in the `openapi` field.
pub const OPENAPI_VERSION: &str = "3.0.1";

pub use compile::{CompiledSchema, JsonSchemaCompiler, SchemaCompiler};
pub use config::{
    ContactConfig, InfoConfig, LogoConfig, OutputPaths, ProjectConfig, RendererOptions,
    SecurityConfig,
};
pub use error::{Error, Result};
pub use generate::Generator;
pub use harvest::{CodeSample, HarvestedOperation, MarkdownSampleExtractor, SampleExtractor};
pub use render::{CommandRenderer, MarkdownRenderer, ReferenceRenderer, OPTIONS_ENV};
pub use routedoc_core::{
    CatalogueError, Method, Right, RouteCatalogue, RouteDescriptor, RouterMount, Schema,
    SchemaKind, SchemaSource, VersionError, VersionedSchema,
};
pub use validate::{validate_file, ApiSummary, SpecValidator, StructuralValidator};

/// Individual pipeline stages, for callers that drive the pipeline step by
/// step or test a single stage.
pub mod stages {
    pub use crate::compose::compose;
    pub use crate::finalize::{display_name, finalize, schema_index, Presentation, MODELS_TAG};
    pub use crate::harvest::{attach_samples, harvest, MAX_INSPECTED_BLOCKS, SAMPLE_LANGUAGES};
    pub use crate::operation::{
        build_operation, describe, OperationContext, API_VERSION_HEADER, ENVIRONMENT_HEADER,
    };
    pub use crate::paths::{group_by_template, normalize_template, path_key, PathSet};
    pub use crate::registry::{ComponentRegistry, TagSet};
    pub use crate::resolve::{ResolvedRoute, Resolver};
}
