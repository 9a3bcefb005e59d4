//! Presentation metadata for the enriched document.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::config::{LogoConfig, ProjectConfig};
use crate::error::Result;
use crate::helpers::{capitalize_first, SCHEMA_REF_PREFIX};

/// Name of the synthetic tag that carries the schema index.
pub const MODELS_TAG: &str = "models";

static INDEX_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([a-z,A-Z]+?)""#).expect("valid regex"));

/// Presentation settings applied by [`finalize`].
#[derive(Debug, Clone, Default)]
pub struct Presentation<'a> {
    /// Logo for `info.x-logo`.
    pub logo: Option<&'a LogoConfig>,
    /// Replacement for `info.description`.
    pub general_information: Option<String>,
    /// Tag display-name overrides.
    pub tag_display_names: Option<&'a IndexMap<String, String>>,
}

impl<'a> Presentation<'a> {
    /// Presentation settings from `config`, reading the general-information
    /// file if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the general-information file cannot be read.
    pub fn from_config(config: &'a ProjectConfig) -> Result<Self> {
        Ok(Self {
            logo: config.logo.as_ref(),
            general_information: config.general_information()?,
            tag_display_names: Some(&config.tag_display_names),
        })
    }
}

/// The `x-displayName` for `tag`: its override, else the tag with its first
/// letter upper-cased.
#[must_use]
pub fn display_name(tag: &str, overrides: Option<&IndexMap<String, String>>) -> String {
    overrides
        .and_then(|names| names.get(tag))
        .cloned()
        .unwrap_or_else(|| capitalize_first(tag))
}

/// Markdown index of the component schemas, one `SchemaDefinition` entry per
/// schema.
///
/// Entries are ordered by the serialized `"name": {...}` text of each schema
/// and named by the first quoted run of letters in that text. Schemas with no
/// such run are left out.
///
/// # Errors
///
/// Returns an error if a schema cannot be serialized.
pub fn schema_index(schemas: &Map<String, Value>) -> Result<String> {
    let mut definitions = schemas
        .iter()
        .map(|(name, schema)| -> Result<String> {
            Ok(format!("\"{name}\": {}", serde_json::to_string(schema)?))
        })
        .collect::<Result<Vec<_>>>()?;
    definitions.sort();

    let entries: Vec<String> = definitions
        .iter()
        .filter_map(|definition| INDEX_NAME.captures(definition))
        .map(|found| {
            let name = &found[1];
            format!("##  {name}\n\n<SchemaDefinition schemaRef=\"{SCHEMA_REF_PREFIX}{name}\"/>")
        })
        .collect();
    Ok(entries.join("\n\n"))
}

/// Apply presentation metadata to `doc`.
///
/// # Errors
///
/// Returns an error if the schema index cannot be built.
pub fn finalize(mut doc: Value, presentation: &Presentation<'_>) -> Result<Value> {
    let schemas = doc
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let index = schema_index(&schemas)?;

    if let Some(info) = doc.get_mut("info").and_then(Value::as_object_mut) {
        if let Some(logo) = presentation.logo {
            info.insert(
                "x-logo".into(),
                json!({ "url": logo.url, "altText": logo.alt_text }),
            );
        }
        if let Some(general) = &presentation.general_information {
            info.insert("description".into(), general.clone().into());
        }
    }

    let mut tags: Vec<Value> = doc
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|tag| tag.get("name").and_then(Value::as_str))
                .map(|name| {
                    json!({
                        "name": name,
                        "x-displayName": display_name(name, presentation.tag_display_names)
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    tags.push(json!({
        "name": MODELS_TAG,
        "x-displayName": "Schemas",
        "description": index
    }));

    if let Some(root) = doc.as_object_mut() {
        root.insert("tags".into(), Value::Array(tags));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schemas(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn display_name_prefers_override() {
        let overrides = IndexMap::from([("authentication".to_string(), "Login".to_string())]);
        assert_eq!(display_name("authentication", Some(&overrides)), "Login");
        assert_eq!(display_name("device", Some(&overrides)), "Device");
        assert_eq!(display_name("reportType", None), "ReportType");
    }

    #[test]
    fn index_is_sorted_by_name() {
        let index = schema_index(&schemas(json!({
            "measurement": {"type": "object"},
            "device": {"type": "object"},
            "pin": {"type": "object"}
        })))
        .unwrap();
        assert_eq!(
            index,
            "##  device\n\n<SchemaDefinition schemaRef=\"#/components/schemas/device\"/>\n\n\
             ##  measurement\n\n<SchemaDefinition schemaRef=\"#/components/schemas/measurement\"/>\n\n\
             ##  pin\n\n<SchemaDefinition schemaRef=\"#/components/schemas/pin\"/>"
        );
    }

    #[test]
    fn index_names_come_from_first_letter_run() {
        let index = schema_index(&schemas(json!({
            "geo2": {"type": "object"}
        })))
        .unwrap();
        assert_eq!(
            index,
            "##  type\n\n<SchemaDefinition schemaRef=\"#/components/schemas/type\"/>"
        );
    }

    #[test]
    fn empty_components_give_empty_index() {
        assert_eq!(schema_index(&Map::new()).unwrap(), "");
    }

    #[test]
    fn finalize_decorates_info_and_tags() {
        let doc = json!({
            "openapi": "3.0.1",
            "info": {"title": "API", "description": "short", "version": "5"},
            "tags": [{"name": "authentication"}, {"name": "device"}],
            "paths": {},
            "components": {"schemas": {"pin": {"type": "object"}}}
        });
        let logo = LogoConfig {
            url: "https://example.com/logo.png".into(),
            alt_text: "example".into(),
        };
        let overrides = IndexMap::from([("authentication".to_string(), "Login".to_string())]);
        let presentation = Presentation {
            logo: Some(&logo),
            general_information: Some("# General".into()),
            tag_display_names: Some(&overrides),
        };

        let doc = finalize(doc, &presentation).unwrap();
        assert_eq!(
            doc["info"],
            json!({
                "title": "API",
                "description": "# General",
                "version": "5",
                "x-logo": {"url": "https://example.com/logo.png", "altText": "example"}
            })
        );
        assert_eq!(
            doc["tags"],
            json!([
                {"name": "authentication", "x-displayName": "Login"},
                {"name": "device", "x-displayName": "Device"},
                {
                    "name": "models",
                    "x-displayName": "Schemas",
                    "description": "##  pin\n\n<SchemaDefinition schemaRef=\"#/components/schemas/pin\"/>"
                }
            ])
        );
    }

    #[test]
    fn finalize_without_presentation_keeps_description() {
        let doc = json!({"info": {"description": "short"}, "tags": []});
        let doc = finalize(doc, &Presentation::default()).unwrap();
        assert_eq!(doc["info"], json!({"description": "short"}));
        assert_eq!(doc["tags"][0]["name"], "models");
        assert_eq!(doc["tags"][0]["description"], "");
    }
}
