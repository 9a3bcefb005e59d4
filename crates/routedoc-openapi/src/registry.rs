//! Accumulators threaded through a generation run.
//!
//! - [`ComponentRegistry`]: named schemas, first definition wins
//! - [`TagSet`]: router tags in first-use order

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Deduplicating store of named component schemas.
///
/// Names are recorded in first-seen order. A later candidate with a name
/// already present is dropped without affecting the stored fragment, even if
/// its content differs; such conflicts are logged and listed by
/// [`conflicts`](Self::conflicts) but never fail the run.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    schemas: IndexMap<String, Value>,
    conflicts: IndexSet<String>,
}

impl ComponentRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates in order; names already present are skipped.
    pub fn register(&mut self, candidates: impl IntoIterator<Item = (String, Value)>) {
        for (name, fragment) in candidates {
            match self.schemas.get(&name) {
                None => {
                    tracing::debug!(component = %name, "registered component schema");
                    self.schemas.insert(name, fragment);
                }
                Some(existing) if *existing != fragment => {
                    tracing::warn!(
                        component = %name,
                        "component name reused for a different schema; keeping the first definition"
                    );
                    self.conflicts.insert(name);
                }
                Some(_) => {}
            }
        }
    }

    /// Whether `name` has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Names registered with two different definitions.
    pub fn conflicts(&self) -> impl Iterator<Item = &str> {
        self.conflicts.iter().map(String::as_str)
    }

    /// The registered `(name, fragment)` pairs in first-seen order.
    #[must_use]
    pub fn finalize(self) -> Vec<(String, Value)> {
        self.schemas.into_iter().collect()
    }
}

/// Insertion-ordered set of router tags.
#[derive(Debug, Default, Clone)]
pub struct TagSet(IndexSet<String>);

impl TagSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag`; returns `false` if it was already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.0.contains(tag) {
            return false;
        }
        self.0.insert(tag.to_string())
    }

    /// Tags in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
