//! Schema resolution: descriptor fields to compiled fragments.
//!
//! Each present field is resolved for the current API version, compiled, and
//! its named components are pushed to the [`ComponentRegistry`]. Fields are
//! resolved in a fixed order (query, params, response, body), which decides
//! the winner when two fields define the same component name.

use serde_json::Value;

use routedoc_core::{RouteDescriptor, SchemaSource};

use crate::compile::SchemaCompiler;
use crate::error::{Error, Result};
use crate::registry::ComponentRegistry;

/// Compiled fragments for one route. `None` where the descriptor has no field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRoute {
    /// Query-string schema.
    pub query: Option<Value>,
    /// Path-parameter object schema.
    pub params: Option<Value>,
    /// Request body schema.
    pub body: Option<Value>,
    /// Success response schema.
    pub response: Option<Value>,
}

/// Resolves descriptor fields for one API version.
pub struct Resolver<'a> {
    compiler: &'a dyn SchemaCompiler,
    version: u32,
}

impl<'a> Resolver<'a> {
    /// A resolver compiling with `compiler` for `version`.
    #[must_use]
    pub fn new(compiler: &'a dyn SchemaCompiler, version: u32) -> Self {
        Self { compiler, version }
    }

    /// The API version schemas are resolved for.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Resolve every present field of `route`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaResolution`] if a versioned field rejects the
    /// version, or any error from the compiler.
    pub fn resolve_route(
        &self,
        name: &str,
        route: &RouteDescriptor,
        registry: &mut ComponentRegistry,
    ) -> Result<ResolvedRoute> {
        let mut resolve = |field: &'static str, source: Option<&SchemaSource>| {
            source
                .map(|source| self.resolve_field(name, field, source, registry))
                .transpose()
        };

        let query = resolve("query", route.query.as_ref())?;
        let params = resolve("params", route.params.as_ref())?;
        let response = resolve("response", route.response.as_ref())?;
        let body = resolve("body", route.body.as_ref())?;

        Ok(ResolvedRoute {
            query,
            params,
            body,
            response,
        })
    }

    /// Resolve and compile one field, registering its components.
    ///
    /// # Errors
    ///
    /// See [`resolve_route`](Self::resolve_route).
    pub fn resolve_field(
        &self,
        route: &str,
        field: &'static str,
        source: &SchemaSource,
        registry: &mut ComponentRegistry,
    ) -> Result<Value> {
        let schema = source
            .resolve(self.version)
            .map_err(|source| Error::SchemaResolution {
                route: route.to_string(),
                field,
                source,
            })?;
        let compiled = self.compiler.compile(&schema)?;
        registry.register(compiled.components);
        Ok(compiled.swagger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::JsonSchemaCompiler;
    use pretty_assertions::assert_eq;
    use routedoc_core::{Method, Schema, VersionError, VersionedSchema};
    use serde_json::json;

    #[test]
    fn absent_fields_stay_none() {
        let route = RouteDescriptor::new(Method::Get, "/");
        let mut registry = ComponentRegistry::new();
        let resolved = Resolver::new(&JsonSchemaCompiler, 1)
            .resolve_route("find", &route, &mut registry)
            .unwrap();
        assert_eq!(resolved, ResolvedRoute::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn versioned_response_uses_requested_version() {
        let route = RouteDescriptor::new(Method::Get, "/").response(VersionedSchema::new(|v| {
            Ok(Schema::object().key("version", Schema::integer().example(v)))
        }));
        let mut registry = ComponentRegistry::new();
        let resolved = Resolver::new(&JsonSchemaCompiler, 5)
            .resolve_route("get", &route, &mut registry)
            .unwrap();
        assert_eq!(
            resolved.response.unwrap()["properties"]["version"]["example"],
            json!(5)
        );
    }

    #[test]
    fn response_components_win_over_body_components() {
        let route = RouteDescriptor::new(Method::Post, "/")
            .body(Schema::object().key("pin", Schema::object().named("pin").key("a", Schema::string())))
            .response(Schema::object().key("pin", Schema::object().named("pin").key("b", Schema::string())));
        let mut registry = ComponentRegistry::new();
        Resolver::new(&JsonSchemaCompiler, 1)
            .resolve_route("add", &route, &mut registry)
            .unwrap();
        let components = registry.finalize();
        assert_eq!(components.len(), 1);
        assert!(components[0].1["properties"].get("b").is_some());
    }

    #[test]
    fn query_and_params_components_are_registered() {
        let route = RouteDescriptor::new(Method::Get, "/:hashId")
            .query(Schema::object().key("sort", Schema::string().named("sortBy")))
            .params(Schema::object().key("hashId", Schema::string().required()));
        let mut registry = ComponentRegistry::new();
        Resolver::new(&JsonSchemaCompiler, 1)
            .resolve_route("get", &route, &mut registry)
            .unwrap();
        assert!(registry.contains("sortBy"));
    }

    #[test]
    fn rejected_version_names_route_and_field() {
        let route = RouteDescriptor::new(Method::Get, "/").body(VersionedSchema::new(|version| {
            Err(VersionError::Rejected {
                version,
                reason: "removed".to_string(),
            })
        }));
        let mut registry = ComponentRegistry::new();
        let err = Resolver::new(&JsonSchemaCompiler, 3)
            .resolve_route("legacy", &route, &mut registry)
            .unwrap_err();
        match err {
            Error::SchemaResolution { route, field, .. } => {
                assert_eq!(route, "legacy");
                assert_eq!(field, "body");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
