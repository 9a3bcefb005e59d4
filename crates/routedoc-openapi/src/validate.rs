//! Structural validation of generated documents.
//!
//! [`StructuralValidator`] first deserializes the document into the typed
//! `openapiv3` model, then walks the JSON for the consistency rules the
//! model alone cannot express:
//!
//! - the `openapi` version is 3.0.x
//! - path keys start with `/`
//! - every `{placeholder}` has a required `in: path` parameter and every path
//!   parameter appears in the template
//! - every operation declares at least one response
//! - every `$ref` resolves to `#/components/schemas/<name>`
//! - every operation tag is declared in `tags`
//!
//! All problems are reported together.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::helpers::{collect_refs, for_each_operation, SCHEMA_REF_PREFIX};

static TEMPLATE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));

/// `info` fields of a document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSummary {
    /// `info.title`.
    pub title: String,
    /// `info.version`.
    pub version: String,
}

/// Accepts or rejects a finished document.
pub trait SpecValidator {
    /// Validate `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] listing every problem found.
    fn validate(&self, doc: &Value) -> Result<ApiSummary>;
}

/// Built-in validator for `OpenAPI` 3.0 documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl SpecValidator for StructuralValidator {
    fn validate(&self, doc: &Value) -> Result<ApiSummary> {
        let api: openapiv3::OpenAPI = serde_json::from_value(doc.clone()).map_err(|e| {
            Error::InvalidDocument {
                problems: vec![format!("not an OpenAPI 3.0 document: {e}")],
            }
        })?;

        let mut problems = Vec::new();
        if !api.openapi.starts_with("3.0") {
            problems.push(format!("unsupported openapi version '{}'", api.openapi));
        }
        check_paths(doc, &mut problems);
        check_operations(doc, &mut problems);
        check_refs(doc, &mut problems);

        if !problems.is_empty() {
            return Err(Error::InvalidDocument { problems });
        }
        Ok(ApiSummary {
            title: api.info.title,
            version: api.info.version,
        })
    }
}

/// Read the document at `path` and validate it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if validation
/// fails.
pub fn validate_file(validator: &dyn SpecValidator, path: &Path) -> Result<ApiSummary> {
    let content = std::fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&content)?;
    validator.validate(&doc)
}

fn check_paths(doc: &Value, problems: &mut Vec<String>) {
    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return;
    };

    for (path, item) in paths {
        if !path.starts_with('/') {
            problems.push(format!("path '{path}' does not start with '/'"));
        }
        let Some(item) = item.as_object() else {
            continue;
        };

        let placeholders: BTreeSet<&str> = TEMPLATE_PARAM
            .captures_iter(path)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        let shared = path_params(item.get("parameters"));

        for (method, op) in item {
            if !crate::helpers::is_operation_key(method) {
                continue;
            }
            let mut declared = shared.clone();
            declared.extend(path_params(op.get("parameters")));

            for name in &placeholders {
                match declared.iter().find(|(param, _)| param == name) {
                    None => problems.push(format!(
                        "{method} {path}: no path parameter for '{{{name}}}'"
                    )),
                    Some((_, false)) => problems.push(format!(
                        "{method} {path}: path parameter '{name}' must be required"
                    )),
                    Some(_) => {}
                }
            }
            for (name, _) in &declared {
                if !placeholders.contains(name.as_str()) {
                    problems.push(format!(
                        "{method} {path}: path parameter '{name}' is not in the template"
                    ));
                }
            }
        }
    }
}

/// `(name, required)` of each `in: path` parameter.
fn path_params(parameters: Option<&Value>) -> Vec<(String, bool)> {
    parameters
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter(|p| p.get("in").and_then(Value::as_str) == Some("path"))
                .filter_map(|p| {
                    let name = p.get("name").and_then(Value::as_str)?;
                    let required = p.get("required").and_then(Value::as_bool).unwrap_or(false);
                    Some((name.to_string(), required))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn check_operations(doc: &Value, problems: &mut Vec<String>) {
    let declared: HashSet<&str> = doc
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    for_each_operation(doc, |path, method, op: &Map<String, Value>| {
        let has_response = op
            .get("responses")
            .and_then(Value::as_object)
            .is_some_and(|r| !r.is_empty());
        if !has_response {
            problems.push(format!("{method} {path}: no responses"));
        }

        let tags = op.get("tags").and_then(Value::as_array);
        for tag in tags.into_iter().flatten().filter_map(Value::as_str) {
            if !declared.contains(tag) {
                problems.push(format!("{method} {path}: tag '{tag}' is not declared"));
            }
        }
    });
}

fn check_refs(doc: &Value, problems: &mut Vec<String>) {
    let schemas = doc.pointer("/components/schemas").and_then(Value::as_object);

    let mut refs = BTreeSet::new();
    collect_refs(doc, &mut refs);
    for reference in refs {
        match reference.strip_prefix(SCHEMA_REF_PREFIX) {
            Some(name) if schemas.is_some_and(|s| s.contains_key(name)) => {}
            Some(_) => problems.push(format!("unresolved reference '{reference}'")),
            None => problems.push(format!("unsupported reference '{reference}'")),
        }
    }
}
