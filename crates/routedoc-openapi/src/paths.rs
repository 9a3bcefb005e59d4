//! Path grouping and path-item assembly.
//!
//! Router-relative templates use `:name` placeholders; document keys use
//! `{name}` and are prefixed with the router's mount path.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};

use routedoc_core::{Method, RouteDescriptor};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(.*?)(/|$)").expect("valid regex"));

/// Rewrite `:name` placeholders to `{name}`.
///
/// ```
/// use routedoc_openapi::stages::normalize_template;
///
/// assert_eq!(normalize_template("/:hashId/link"), "/{hashId}/link");
/// assert_eq!(normalize_template("/"), "/");
/// ```
#[must_use]
pub fn normalize_template(template: &str) -> String {
    PLACEHOLDER.replace_all(template, "{${1}}${2}").into_owned()
}

/// The document path key for a router-relative template.
#[must_use]
pub fn path_key(router_path: &str, template: &str) -> String {
    format!("/{router_path}{}", normalize_template(template))
}

/// Group a router's routes by literal template, in first-seen order.
///
/// Each group holds `(operation name, descriptor)` pairs in declaration order.
#[must_use]
pub fn group_by_template(
    routes: &IndexMap<String, RouteDescriptor>,
) -> IndexMap<&str, Vec<(&str, &RouteDescriptor)>> {
    let mut groups: IndexMap<&str, Vec<(&str, &RouteDescriptor)>> = IndexMap::new();
    for (name, route) in routes {
        groups
            .entry(route.path.as_str())
            .or_default()
            .push((name.as_str(), route));
    }
    groups
}

/// The document's `paths` object under construction.
///
/// Keys keep first-insertion order. Operations for a key that already exists
/// are merged into its path item; a second operation for the same verb
/// replaces the first.
#[derive(Debug, Default)]
pub struct PathSet {
    items: IndexMap<String, Map<String, Value>>,
}

impl PathSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `operation` under `key` and `method`.
    ///
    /// Returns the operation it replaced, if any.
    pub fn insert(&mut self, key: &str, method: Method, operation: Value) -> Option<Value> {
        let item = self.items.entry(key.to_string()).or_default();
        let replaced = item.insert(method.as_str().to_string(), operation);
        if replaced.is_some() {
            tracing::warn!(
                path = %key,
                method = %method,
                "duplicate operation for path and verb; the later definition wins"
            );
        }
        replaced
    }

    /// The path item stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Map<String, Value>> {
        self.items.get(key)
    }

    /// Number of path keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no operation has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `paths` object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(
            self.items
                .into_iter()
                .map(|(key, item)| (key, Value::Object(item)))
                .collect(),
        )
    }
}
