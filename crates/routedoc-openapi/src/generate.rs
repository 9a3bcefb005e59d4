//! Pipeline driver: catalogue to plain document to enriched document.
//!
//! The collaborators (schema compiler, markdown renderer, sample extractor,
//! validator) default to the in-tree implementations and can be swapped
//! through the builder methods.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use routedoc_core::RouteCatalogue;

use crate::compile::{JsonSchemaCompiler, SchemaCompiler};
use crate::compose::compose;
use crate::config::{OutputPaths, ProjectConfig};
use crate::error::Result;
use crate::finalize::{finalize, Presentation};
use crate::harvest::{harvest, MarkdownSampleExtractor, SampleExtractor};
use crate::operation::{build_operation, OperationContext};
use crate::paths::{group_by_template, path_key, PathSet};
use crate::registry::{ComponentRegistry, TagSet};
use crate::render::{MarkdownRenderer, ReferenceRenderer};
use crate::resolve::Resolver;
use crate::validate::{validate_file, ApiSummary, SpecValidator, StructuralValidator};

/// Runs the document synthesis pipeline for one project config.
pub struct Generator {
    config: ProjectConfig,
    compiler: Box<dyn SchemaCompiler>,
    renderer: Box<dyn MarkdownRenderer>,
    extractor: Box<dyn SampleExtractor>,
    validator: Box<dyn SpecValidator>,
}

impl Generator {
    /// A generator with the built-in collaborators.
    #[must_use]
    pub fn new(config: &ProjectConfig) -> Self {
        Self {
            config: config.clone(),
            compiler: Box::new(JsonSchemaCompiler),
            renderer: Box::new(ReferenceRenderer),
            extractor: Box::new(MarkdownSampleExtractor),
            validator: Box::new(StructuralValidator),
        }
    }

    /// Use `compiler` for descriptor schemas.
    #[must_use]
    pub fn compiler(mut self, compiler: impl SchemaCompiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// Use `renderer` to produce the markdown samples are harvested from.
    #[must_use]
    pub fn renderer(mut self, renderer: impl MarkdownRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Use `extractor` to recover samples from the rendered markdown.
    #[must_use]
    pub fn extractor(mut self, extractor: impl SampleExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Use `validator` for the final check.
    #[must_use]
    pub fn validator(mut self, validator: impl SpecValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// The project config this generator runs with.
    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Build the plain document from `catalogue`.
    ///
    /// # Errors
    ///
    /// Returns an error if a router has no mount record, a schema cannot be
    /// resolved for the configured version, or path parameters are not an
    /// inline object.
    pub fn build_plain(&self, catalogue: &RouteCatalogue) -> Result<Value> {
        let api_version = self.config.api_version;
        let resolver = Resolver::new(self.compiler.as_ref(), api_version);
        let mut registry = ComponentRegistry::new();
        let mut tags = TagSet::new();
        let mut paths = PathSet::new();

        for (router, routes) in &catalogue.routes {
            let tag = catalogue.mount(router)?.router_path.as_str();
            info!(router = %router, tag = %tag, routes = routes.len(), "adding router");

            for (template, group) in group_by_template(routes) {
                let key = path_key(tag, template);
                for (name, route) in group {
                    let resolved = resolver.resolve_route(name, route, &mut registry)?;
                    tags.insert(tag);
                    let ctx = OperationContext {
                        tag,
                        summary: name,
                        public: self.config.is_public(tag),
                        api_version,
                    };
                    let operation = build_operation(route, &resolved, &ctx)?;
                    paths.insert(&key, route.method, operation);
                    info!(method = %route.method, path = %key, route = %name, "added route");
                }
            }
        }

        debug!(
            paths = paths.len(),
            tags = tags.len(),
            components = registry.len(),
            "composing plain document"
        );
        Ok(compose(&self.config, &tags, paths, registry.finalize()))
    }

    /// Build the enriched document from a plain one.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails, a rendered operation is missing
    /// from `plain`, or the general-information file cannot be read.
    pub fn enrich(&self, plain: &Value) -> Result<Value> {
        let markdown = self.renderer.render(plain, &self.config.renderer)?;
        debug!(bytes = markdown.len(), "rendered reference markdown");

        let enriched = harvest(self.extractor.as_ref(), &markdown, plain)?;
        let presentation = Presentation::from_config(&self.config)?;
        finalize(enriched, &presentation)
    }

    /// Run the whole pipeline, writing both documents.
    ///
    /// The plain document is written before enrichment starts and stays on
    /// disk if a later step fails.
    ///
    /// # Errors
    ///
    /// Returns the first error of any step, including validation of the
    /// written enriched document.
    pub fn run(&self, catalogue: &RouteCatalogue, outputs: &OutputPaths) -> Result<ApiSummary> {
        let plain = self.build_plain(catalogue)?;
        write_json(&outputs.plain, &plain)?;
        info!(path = %outputs.plain.display(), "wrote plain document");

        let enriched = self.enrich(&plain)?;
        write_json(&outputs.enriched, &enriched)?;
        info!(path = %outputs.enriched.display(), "wrote enriched document");

        let summary = validate_file(self.validator.as_ref(), &outputs.enriched)?;
        info!(title = %summary.title, version = %summary.version, "validated enriched document");
        Ok(summary)
    }
}

fn write_json(path: &Path, doc: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(doc)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}
