//! Operation assembly: one route descriptor to one `OpenAPI` operation object.
//!
//! Parameter order is fixed: `Environment-Hash-Id` (scoped rights only),
//! `Api-Version`, `query` (if any), then path parameters sorted by name.

use std::fmt::Write as _;

use serde_json::{json, Map, Value};

use routedoc_core::{Right, RouteDescriptor};

use crate::error::{Error, Result};
use crate::resolve::ResolvedRoute;
use crate::MEDIA_TYPE;

/// Header naming the environment a scoped right is checked against.
pub const ENVIRONMENT_HEADER: &str = "Environment-Hash-Id";

/// Header carrying the client's API version.
pub const API_VERSION_HEADER: &str = "Api-Version";

/// Per-operation facts that come from the router, not the descriptor.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    /// Owning router's tag (its mount path).
    pub tag: &'a str,
    /// Operation summary: the descriptor's catalogue key.
    pub summary: &'a str,
    /// Whether the operation overrides security with `[]`.
    pub public: bool,
    /// Current API version, used as the `Api-Version` example.
    pub api_version: u32,
}

/// Build the operation object for `route`.
///
/// # Errors
///
/// Returns [`Error::PathParamsNotObject`] if the path-parameter schema is not
/// an inline object with `properties`.
pub fn build_operation(
    route: &RouteDescriptor,
    resolved: &ResolvedRoute,
    ctx: &OperationContext<'_>,
) -> Result<Value> {
    let mut op = Map::new();

    op.insert("summary".into(), ctx.summary.into());
    if let Some(description) = describe(route.description.as_deref(), route.right.as_ref()) {
        op.insert("description".into(), description.into());
    }
    if ctx.public {
        op.insert("security".into(), Value::Array(Vec::new()));
    }
    op.insert(
        "parameters".into(),
        Value::Array(parameters(route.right.as_ref(), resolved, ctx)?),
    );
    op.insert("responses".into(), responses(resolved.response.as_ref()));
    if let Some(body) = &resolved.body {
        op.insert(
            "requestBody".into(),
            json!({ "content": { MEDIA_TYPE: { "schema": body } } }),
        );
    }
    op.insert("tags".into(), json!([ctx.tag]));

    Ok(Value::Object(op))
}

/// Compose the operation description.
///
/// `None` when neither a description nor a right is present. Otherwise the
/// free text, followed (when a right is present) by a space and a "Rights"
/// section listing the connectivity then the monitoring requirement.
#[must_use]
pub fn describe(description: Option<&str>, right: Option<&Right>) -> Option<String> {
    if description.is_none() && right.is_none() {
        return None;
    }

    let mut text = description.unwrap_or_default().to_string();
    if let Some(right) = right {
        text.push(' ');
        if right.is_scoped() {
            text.push_str("\n\nRights\n\n");
            if let Some(supplier) = right.supplier_right() {
                let _ = write!(text, "- *Connectivity environment*: {supplier}\n\n");
            }
            if let Some(environment) = right.environment_right() {
                let _ = write!(text, "- *Monitoring environment*: {environment}\n\n");
            }
        }
    }
    Some(text)
}

fn parameters(
    right: Option<&Right>,
    resolved: &ResolvedRoute,
    ctx: &OperationContext<'_>,
) -> Result<Vec<Value>> {
    let mut params = Vec::new();

    if right.is_some_and(Right::is_scoped) {
        params.push(json!({
            "name": ENVIRONMENT_HEADER,
            "required": true,
            "in": "header",
            "schema": { "type": "string", "example": "yourAssetEnvironmentHashId" }
        }));
    }

    params.push(json!({
        "name": API_VERSION_HEADER,
        "required": true,
        "in": "header",
        "schema": { "type": "integer", "example": ctx.api_version }
    }));

    if let Some(query) = &resolved.query {
        params.push(json!({
            "name": "query",
            "schema": query,
            "required": false,
            "in": "query"
        }));
    }

    if let Some(path_schema) = &resolved.params {
        let Some(properties) = path_schema.get("properties").and_then(Value::as_object) else {
            return Err(Error::PathParamsNotObject {
                route: ctx.summary.to_string(),
            });
        };
        let required: Vec<&str> = path_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut names: Vec<&String> = properties.keys().collect();
        names.sort();
        for name in names {
            params.push(json!({
                "name": name,
                "schema": properties[name.as_str()],
                "required": required.contains(&name.as_str()),
                "in": "path"
            }));
        }
    }

    Ok(params)
}

fn responses(response: Option<&Value>) -> Value {
    match response {
        Some(schema) => json!({
            "200": {
                "description": "Success",
                "content": { MEDIA_TYPE: { "schema": schema } }
            }
        }),
        None => json!({ "204": { "description": "No Content" } }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routedoc_core::Method;

    fn ctx() -> OperationContext<'static> {
        OperationContext {
            tag: "device",
            summary: "link",
            public: false,
            api_version: 5,
        }
    }

    fn param_names(op: &Value) -> Vec<String> {
        op["parameters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn parameter_order_is_fixed() {
        let route = RouteDescriptor::new(Method::Get, "/:zone/:hashId/:area")
            .right(Right::environment("READ"));
        let resolved = ResolvedRoute {
            query: Some(json!({"type": "object", "properties": {"rowsPerPage": {"type": "integer"}}})),
            params: Some(json!({
                "type": "object",
                "properties": {
                    "zone": {"type": "string"},
                    "hashId": {"type": "string"},
                    "area": {"type": "string"}
                },
                "required": ["hashId", "zone"]
            })),
            ..ResolvedRoute::default()
        };

        let op = build_operation(&route, &resolved, &ctx()).unwrap();
        assert_eq!(
            param_names(&op),
            vec!["Environment-Hash-Id", "Api-Version", "query", "area", "hashId", "zone"]
        );
        let params = op["parameters"].as_array().unwrap();
        assert_eq!(params[2]["in"], "query");
        assert_eq!(params[2]["required"], false);
        assert_eq!(params[3]["in"], "path");
        assert_eq!(params[3]["required"], false);
        assert_eq!(params[4]["required"], true);
        assert_eq!(params[5]["required"], true);
        assert_eq!(params[1]["schema"], json!({"type": "integer", "example": 5}));
    }

    #[test]
    fn tag_right_has_no_environment_header() {
        let route = RouteDescriptor::new(Method::Post, "/edge").right(Right::Tag("STATIC".into()));
        let op = build_operation(&route, &ResolvedRoute::default(), &ctx()).unwrap();
        assert_eq!(param_names(&op), vec!["Api-Version"]);
    }

    #[test]
    fn supplier_right_adds_environment_header() {
        let route = RouteDescriptor::new(Method::Get, "/").right(Right::supplier("ENVIRONMENT_ADMIN"));
        let op = build_operation(&route, &ResolvedRoute::default(), &ctx()).unwrap();
        assert_eq!(param_names(&op), vec!["Environment-Hash-Id", "Api-Version"]);
    }

    #[test]
    fn responses_are_exclusive() {
        let route = RouteDescriptor::new(Method::Get, "/");
        let without = build_operation(&route, &ResolvedRoute::default(), &ctx()).unwrap();
        let keys: Vec<&String> = without["responses"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["204"]);
        assert_eq!(without["responses"]["204"], json!({"description": "No Content"}));

        let resolved = ResolvedRoute {
            response: Some(json!({"type": "object"})),
            ..ResolvedRoute::default()
        };
        let with = build_operation(&route, &resolved, &ctx()).unwrap();
        let keys: Vec<&String> = with["responses"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["200"]);
        assert_eq!(
            with["responses"]["200"]["content"]["text/json"]["schema"],
            json!({"type": "object"})
        );
    }

    #[test]
    fn request_body_only_with_body() {
        let route = RouteDescriptor::new(Method::Post, "/");
        let op = build_operation(&route, &ResolvedRoute::default(), &ctx()).unwrap();
        assert!(op.get("requestBody").is_none());

        let resolved = ResolvedRoute {
            body: Some(json!({"type": "string"})),
            ..ResolvedRoute::default()
        };
        let op = build_operation(&route, &resolved, &ctx()).unwrap();
        assert_eq!(
            op["requestBody"],
            json!({"content": {"text/json": {"schema": {"type": "string"}}}})
        );
    }

    #[test]
    fn key_order_matches_document_layout() {
        let route = RouteDescriptor::new(Method::Post, "/")
            .description("Log in")
            .right(Right::Tag("STATIC".into()));
        let resolved = ResolvedRoute {
            body: Some(json!({"type": "object"})),
            ..ResolvedRoute::default()
        };
        let public = OperationContext {
            public: true,
            ..ctx()
        };
        let op = build_operation(&route, &resolved, &public).unwrap();
        let keys: Vec<&String> = op.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["summary", "description", "security", "parameters", "responses", "requestBody", "tags"]
        );
        assert_eq!(op["security"], json!([]));
        assert_eq!(op["tags"], json!(["device"]));
    }

    #[test]
    fn description_omitted_without_text_or_right() {
        assert_eq!(describe(None, None), None);
        let op = build_operation(
            &RouteDescriptor::new(Method::Get, "/"),
            &ResolvedRoute::default(),
            &ctx(),
        )
        .unwrap();
        assert!(op.get("description").is_none());
    }

    #[test]
    fn description_lists_rights_in_fixed_order() {
        let right = Right::Scoped {
            supplier: Some("ENVIRONMENT_ADMIN".into()),
            environment: Some("READ".into()),
        };
        assert_eq!(
            describe(Some("Search through devices"), Some(&right)).unwrap(),
            "Search through devices \n\nRights\n\n\
             - *Connectivity environment*: ENVIRONMENT_ADMIN\n\n\
             - *Monitoring environment*: READ\n\n"
        );
    }

    #[test]
    fn description_with_unscoped_right_only() {
        let right = Right::Tag("STATIC".into());
        assert_eq!(describe(None, Some(&right)).unwrap(), " ");
        assert_eq!(describe(Some("Create an edge"), Some(&right)).unwrap(), "Create an edge ");
        assert_eq!(describe(Some("Plain"), None).unwrap(), "Plain");
    }

    #[test]
    fn referenced_path_params_are_rejected() {
        let route = RouteDescriptor::new(Method::Get, "/:hashId");
        let resolved = ResolvedRoute {
            params: Some(json!({"$ref": "#/components/schemas/hashIdParams"})),
            ..ResolvedRoute::default()
        };
        let err = build_operation(&route, &resolved, &ctx()).unwrap_err();
        assert!(matches!(err, Error::PathParamsNotObject { route } if route == "link"));
    }
}
