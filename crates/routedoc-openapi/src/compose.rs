//! Document composition: accumulated paths, tags and components to the plain
//! `OpenAPI` document.

use serde_json::{json, Map, Value};

use crate::config::ProjectConfig;
use crate::paths::PathSet;
use crate::registry::TagSet;
use crate::OPENAPI_VERSION;

/// Assemble the plain document.
///
/// Every operation is covered by a single bearer JWT scheme unless it carries
/// its own `security: []` override. Tags are emitted in first-use order and
/// component schemas in registration order.
#[must_use]
pub fn compose(
    config: &ProjectConfig,
    tags: &TagSet,
    paths: PathSet,
    components: Vec<(String, Value)>,
) -> Value {
    let mut info = Map::new();
    info.insert("title".into(), config.info.title.clone().into());
    info.insert("description".into(), config.info.description.clone().into());
    if let Some(contact) = &config.info.contact {
        info.insert("contact".into(), json!(contact));
    }
    info.insert("version".into(), config.api_version.to_string().into());

    let tags: Vec<Value> = tags.iter().map(|name| json!({ "name": name })).collect();
    let schemas: Map<String, Value> = components.into_iter().collect();

    let scheme = &config.security.scheme_name;
    let bearer = json!({
        "description": config.security.description,
        "type": "http",
        "scheme": "bearer",
        "bearerFormat": "JWT"
    });

    json!({
        "openapi": OPENAPI_VERSION,
        "info": info,
        "servers": [{ "url": config.server_url }],
        "tags": tags,
        "paths": paths.into_value(),
        "components": {
            "schemas": schemas,
            "securitySchemes": { scheme.as_str(): bearer }
        },
        "security": [{ scheme.as_str(): [] }]
    })
}
