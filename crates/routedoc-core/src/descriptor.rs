//! Route descriptors: one declarative record per HTTP operation.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::VersionError;
use crate::schema::Schema;

/// HTTP verbs a route may be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Every supported verb.
    pub const ALL: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

    /// Lower-case wire name, as used for `OpenAPI` path-item keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// Parse a lower-case wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization requirement attached to a route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Right {
    /// A fixed right tag such as `STATIC`.
    Tag(String),
    /// Rights scoped to a connectivity (`supplier`) and/or monitoring
    /// (`environment`) environment.
    #[serde(rename_all = "camelCase")]
    Scoped {
        /// Right required in the connectivity environment.
        #[serde(default)]
        supplier: Option<String>,
        /// Right required in the monitoring environment.
        #[serde(default)]
        environment: Option<String>,
    },
}

impl Right {
    /// Scoped right on the monitoring environment only.
    #[must_use]
    pub fn environment(right: &str) -> Self {
        Self::Scoped {
            supplier: None,
            environment: Some(right.to_string()),
        }
    }

    /// Scoped right on the connectivity environment only.
    #[must_use]
    pub fn supplier(right: &str) -> Self {
        Self::Scoped {
            supplier: Some(right.to_string()),
            environment: None,
        }
    }

    /// The connectivity-environment requirement, if any.
    #[must_use]
    pub fn supplier_right(&self) -> Option<&str> {
        match self {
            Self::Scoped { supplier, .. } => supplier.as_deref(),
            Self::Tag(_) => None,
        }
    }

    /// The monitoring-environment requirement, if any.
    #[must_use]
    pub fn environment_right(&self) -> Option<&str> {
        match self {
            Self::Scoped { environment, .. } => environment.as_deref(),
            Self::Tag(_) => None,
        }
    }

    /// Whether the caller must name an environment (either kind).
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        self.supplier_right().is_some() || self.environment_right().is_some()
    }
}

type SchemaFn = dyn Fn(u32) -> Result<Schema, VersionError> + Send + Sync;

/// A schema that depends on the requested API version.
#[derive(Clone)]
pub struct VersionedSchema(Arc<SchemaFn>);

impl VersionedSchema {
    /// Wrap a schema-producing function.
    pub fn new(f: impl Fn(u32) -> Result<Schema, VersionError> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Build from a version table.
    ///
    /// The variant with the greatest `since` not above the requested version
    /// wins; versions older than every variant are rejected.
    #[must_use]
    pub fn from_table(mut variants: Vec<VersionedVariant>) -> Self {
        variants.sort_by_key(|v| v.since);
        Self::new(move |version| {
            variants
                .iter()
                .rev()
                .find(|v| v.since <= version)
                .map(|v| v.schema.clone())
                .ok_or(VersionError::Unsupported {
                    version,
                    earliest: variants.first().map_or(0, |v| v.since),
                })
        })
    }

    /// Produce the schema for `version`.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying producer rejects the version with.
    pub fn resolve(&self, version: u32) -> Result<Schema, VersionError> {
        (self.0)(version)
    }
}

impl fmt::Debug for VersionedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VersionedSchema(..)")
    }
}

/// One entry of a catalogue-file version table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionedVariant {
    /// First API version this variant applies to.
    pub since: u32,
    /// The schema for that version range.
    pub schema: Schema,
}

/// A route field's schema: either fixed or a function of the API version.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "SchemaSourceRepr")]
pub enum SchemaSource {
    /// Same schema for every version.
    Fixed(Schema),
    /// Schema computed per version.
    Versioned(VersionedSchema),
}

impl SchemaSource {
    /// Resolve to a concrete schema for `version`.
    ///
    /// # Errors
    ///
    /// Fails only for [`SchemaSource::Versioned`] producers that reject the version.
    pub fn resolve(&self, version: u32) -> Result<Schema, VersionError> {
        match self {
            Self::Fixed(schema) => Ok(schema.clone()),
            Self::Versioned(versioned) => versioned.resolve(version),
        }
    }
}

impl From<Schema> for SchemaSource {
    fn from(schema: Schema) -> Self {
        Self::Fixed(schema)
    }
}

impl From<VersionedSchema> for SchemaSource {
    fn from(versioned: VersionedSchema) -> Self {
        Self::Versioned(versioned)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VersionTable {
    versions: Vec<VersionedVariant>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaSourceRepr {
    Versioned(VersionTable),
    Fixed(Schema),
}

impl TryFrom<SchemaSourceRepr> for SchemaSource {
    type Error = String;

    fn try_from(repr: SchemaSourceRepr) -> Result<Self, Self::Error> {
        match repr {
            SchemaSourceRepr::Fixed(schema) => Ok(Self::Fixed(schema)),
            SchemaSourceRepr::Versioned(table) if table.versions.is_empty() => {
                Err("a `versions` table needs at least one entry".to_string())
            }
            SchemaSourceRepr::Versioned(table) => {
                Ok(Self::Versioned(VersionedSchema::from_table(table.versions)))
            }
        }
    }
}

/// Declarative description of one HTTP operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RouteDescriptor {
    /// HTTP verb.
    pub method: Method,

    /// URL template relative to the router mount, with `:name` placeholders.
    pub path: String,

    /// Query-string schema.
    #[serde(default)]
    pub query: Option<SchemaSource>,

    /// Path-parameter schema; must resolve to an object.
    #[serde(default)]
    pub params: Option<SchemaSource>,

    /// Request body schema.
    #[serde(default)]
    pub body: Option<SchemaSource>,

    /// Success response schema; absent means `204 No Content`.
    #[serde(default)]
    pub response: Option<SchemaSource>,

    /// Authorization requirement.
    #[serde(default)]
    pub right: Option<Right>,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl RouteDescriptor {
    /// A bare descriptor with only verb and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: None,
            params: None,
            body: None,
            response: None,
            right: None,
            description: None,
        }
    }

    /// Set the query schema.
    #[must_use]
    pub fn query(mut self, schema: impl Into<SchemaSource>) -> Self {
        self.query = Some(schema.into());
        self
    }

    /// Set the path-parameter schema.
    #[must_use]
    pub fn params(mut self, schema: impl Into<SchemaSource>) -> Self {
        self.params = Some(schema.into());
        self
    }

    /// Set the request body schema.
    #[must_use]
    pub fn body(mut self, schema: impl Into<SchemaSource>) -> Self {
        self.body = Some(schema.into());
        self
    }

    /// Set the response schema.
    #[must_use]
    pub fn response(mut self, schema: impl Into<SchemaSource>) -> Self {
        self.response = Some(schema.into());
        self
    }

    /// Set the authorization requirement.
    #[must_use]
    pub fn right(mut self, right: Right) -> Self {
        self.right = Some(right);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn right_deserializes_tag_and_scoped() {
        let tag: Right = serde_yaml_ng::from_str("STATIC").unwrap();
        assert_eq!(tag, Right::Tag("STATIC".to_string()));
        assert!(!tag.is_scoped());

        let scoped: Right =
            serde_yaml_ng::from_str("{ environment: READ, supplier: ENVIRONMENT_ADMIN }").unwrap();
        assert_eq!(scoped.environment_right(), Some("READ"));
        assert_eq!(scoped.supplier_right(), Some("ENVIRONMENT_ADMIN"));
        assert!(scoped.is_scoped());

        let empty: Right = serde_yaml_ng::from_str("{}").unwrap();
        assert!(!empty.is_scoped());
    }

    #[test]
    fn method_round_trips_wire_name() {
        for method in Method::ALL {
            assert_eq!(Method::from_wire(method.as_str()), Some(method));
        }
        assert_eq!(Method::from_wire("patch"), None);
    }

    #[test]
    fn version_table_picks_latest_applicable_variant() {
        let source: SchemaSource = serde_yaml_ng::from_str(indoc! {r"
            versions:
              - since: 4
                schema: { type: integer }
              - since: 1
                schema: { type: string }
        "})
        .unwrap();

        assert_eq!(source.resolve(1).unwrap(), Schema::string());
        assert_eq!(source.resolve(3).unwrap(), Schema::string());
        assert_eq!(source.resolve(4).unwrap(), Schema::integer());
        assert_eq!(source.resolve(9).unwrap(), Schema::integer());
    }

    #[test]
    fn version_table_rejects_older_version() {
        let source: SchemaSource = serde_yaml_ng::from_str(indoc! {r"
            versions:
              - since: 3
                schema: { type: string }
        "})
        .unwrap();
        let err = source.resolve(2).unwrap_err();
        assert_eq!(
            err,
            VersionError::Unsupported {
                version: 2,
                earliest: 3
            }
        );
    }

    #[test]
    fn empty_version_table_is_rejected() {
        let result: Result<SchemaSource, _> = serde_yaml_ng::from_str("versions: []");
        assert!(result.is_err());
    }

    #[test]
    fn plain_schema_is_fixed() {
        let source: SchemaSource = serde_yaml_ng::from_str("type: boolean").unwrap();
        assert!(matches!(source, SchemaSource::Fixed(_)));
        assert_eq!(source.resolve(42).unwrap(), Schema::boolean());
    }

    #[test]
    fn closure_versioned_schema() {
        let source = SchemaSource::from(VersionedSchema::new(|version| {
            if version >= 2 {
                Ok(Schema::object().key("v", Schema::integer().example(version)))
            } else {
                Err(VersionError::Rejected {
                    version,
                    reason: "legacy".to_string(),
                })
            }
        }));
        assert!(source.resolve(1).is_err());
        let schema = source.resolve(2).unwrap();
        assert_eq!(schema.keys["v"].example, Some(serde_json::json!(2)));
    }

    #[test]
    fn descriptor_rejects_unknown_fields() {
        let result: Result<RouteDescriptor, _> =
            serde_yaml_ng::from_str("method: get\npath: /\nrights: STATIC\n");
        assert!(result.is_err());
    }
}
