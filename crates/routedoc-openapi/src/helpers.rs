//! Shared JSON document helpers used across pipeline stages.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use routedoc_core::Method;

/// Prefix of every component schema reference.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Build a `$ref` object pointing at a component schema.
pub fn schema_ref(name: &str) -> Value {
    let mut reference = Map::new();
    reference.insert("$ref".to_string(), Value::String(format!("{SCHEMA_REF_PREFIX}{name}")));
    Value::Object(reference)
}

/// Whether a path-item key is an HTTP verb this pipeline emits.
///
/// Path items can also contain `summary`, `description`, `parameters`, and
/// `servers` keys; callers skip those so callbacks only see operations.
pub fn is_operation_key(key: &str) -> bool {
    Method::from_wire(key).is_some()
}

/// Call `f(path, method, operation)` for every operation in the document,
/// in document order.
pub fn for_each_operation(doc: &Value, mut f: impl FnMut(&str, &str, &Map<String, Value>)) {
    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return;
    };

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (method, operation) in item {
            if !is_operation_key(method) {
                continue;
            }
            if let Some(op) = operation.as_object() {
                f(path, method, op);
            }
        }
    }
}

/// Recursively walk a JSON value tree and collect all `$ref` string values.
pub fn collect_refs(value: &Value, refs: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == "$ref" {
                    if let Some(s) = v.as_str() {
                        refs.insert(s.to_string());
                    }
                }
                collect_refs(v, refs);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, refs);
            }
        }
        _ => {}
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
