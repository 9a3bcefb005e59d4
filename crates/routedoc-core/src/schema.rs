//! Declarative schema language for route inputs and outputs.
//!
//! A [`Schema`] is a tree of typed nodes in the spirit of Joi: an object node
//! lists its `keys` in order, each child carries its own `required` flag, and
//! any node may be given a `name` to become a shared component.
//!
//! Nodes can be written in catalogue files:
//!
//! ```yaml
//! type: object
//! name: pin
//! keys:
//!   hashId: { type: string, required: true, example: e13d57 }
//!   level: { type: integer, valid: [0, 1, 2], required: true }
//!   deletedAt: { type: date, allowNull: true, required: true }
//! ```
//!
//! or built with the fluent constructors:
//!
//! ```
//! use routedoc_core::Schema;
//!
//! let pin = Schema::object()
//!     .named("pin")
//!     .key("hashId", Schema::string().required().example("e13d57"))
//!     .key("deletedAt", Schema::date().allow_null().required());
//! assert_eq!(pin.keys.len(), 2);
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The value type a [`Schema`] node describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Any value.
    #[default]
    Any,
    /// A string.
    String,
    /// A floating point number.
    Number,
    /// An integer.
    Integer,
    /// A boolean.
    Boolean,
    /// An ISO 8601 timestamp carried as a string.
    Date,
    /// An object with ordered, typed keys.
    Object,
    /// An array of `items`.
    Array,
    /// Exactly one of several `alternatives`.
    Alternatives,
}

/// One node of the declarative schema language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Schema {
    /// Node type.
    #[serde(rename = "type")]
    pub kind: SchemaKind,

    /// Component name; a named node is emitted once under
    /// `components.schemas` and referenced everywhere else.
    pub name: Option<String>,

    /// Object keys, in declaration order.
    pub keys: IndexMap<String, Schema>,

    /// Array element schema.
    pub items: Option<Box<Schema>>,

    /// Candidate schemas for [`SchemaKind::Alternatives`].
    pub alternatives: Vec<Schema>,

    /// Whether the enclosing object requires this key.
    pub required: bool,

    /// Whether `null` is accepted in addition to the node type.
    pub allow_null: bool,

    /// Closed set of accepted values.
    pub valid: Vec<Value>,

    /// Lower bound: length for strings, item count for arrays, value for numbers.
    pub min: Option<i64>,

    /// Upper bound, same interpretation as `min`.
    pub max: Option<i64>,

    /// Regular expression a string must match.
    pub pattern: Option<String>,

    /// Format hint (e.g. `email`, `uri`).
    pub format: Option<String>,

    /// Free-text description.
    pub description: Option<String>,

    /// Example value.
    pub example: Option<Value>,

    /// Default value.
    pub default: Option<Value>,
}

impl Schema {
    /// A node of the given kind with no constraints.
    #[must_use]
    pub fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// An unconstrained node.
    #[must_use]
    pub fn any() -> Self {
        Self::of(SchemaKind::Any)
    }

    /// A string node.
    #[must_use]
    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    /// A number node.
    #[must_use]
    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    /// An integer node.
    #[must_use]
    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    /// A boolean node.
    #[must_use]
    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    /// A timestamp node.
    #[must_use]
    pub fn date() -> Self {
        Self::of(SchemaKind::Date)
    }

    /// An object node without keys.
    #[must_use]
    pub fn object() -> Self {
        Self::of(SchemaKind::Object)
    }

    /// An array node of `items`.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaKind::Array)
        }
    }

    /// An alternatives node trying each candidate in order.
    #[must_use]
    pub fn alternatives(candidates: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            alternatives: candidates.into_iter().collect(),
            ..Self::of(SchemaKind::Alternatives)
        }
    }

    /// Append an object key.
    #[must_use]
    pub fn key(mut self, name: &str, schema: Schema) -> Self {
        self.keys.insert(name.to_string(), schema);
        self
    }

    /// Give the node a component name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Mark the node as required by its parent object.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept `null` as well.
    #[must_use]
    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Restrict to a closed set of values.
    #[must_use]
    pub fn valid(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.valid = values.into_iter().collect();
        self
    }

    /// Set the lower bound.
    #[must_use]
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the string pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Set the format hint.
    #[must_use]
    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Set the example value.
    #[must_use]
    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Names of the object keys marked required, in key order.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, child)| child.required)
            .map(|(name, _)| name.as_str())
    }
}
