//! Schema compilation: declarative [`Schema`] trees to JSON Schema fragments.
//!
//! The pipeline only needs one capability from a schema library: turn a
//! schema into a JSON-Schema-compatible fragment plus the named sub-schemas
//! it references. [`SchemaCompiler`] is that seam; [`JsonSchemaCompiler`] is
//! the built-in implementation.

use serde_json::{Map, Value};

use routedoc_core::{Schema, SchemaKind};

use crate::error;
use crate::helpers::schema_ref;

/// Output of compiling one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledSchema {
    /// The fragment to embed at the use site.
    pub swagger: Value,
    /// Named sub-schemas the fragment references, dependencies first.
    pub components: Vec<(String, Value)>,
}

/// Compiles declarative schemas to `OpenAPI` 3.0 schema objects.
pub trait SchemaCompiler {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Implementations may reject schemas they cannot express.
    fn compile(&self, schema: &Schema) -> error::Result<CompiledSchema>;
}

/// Built-in compiler targeting the `OpenAPI` 3.0 schema dialect.
///
/// Named nodes become `$ref`s; their bodies are appended to
/// [`CompiledSchema::components`] after any components they themselves use.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaCompiler;

impl SchemaCompiler for JsonSchemaCompiler {
    fn compile(&self, schema: &Schema) -> error::Result<CompiledSchema> {
        let mut components = Vec::new();
        let swagger = compile_node(schema, &mut components);
        Ok(CompiledSchema {
            swagger,
            components,
        })
    }
}

fn compile_node(schema: &Schema, components: &mut Vec<(String, Value)>) -> Value {
    let mut out = Map::new();

    match schema.kind {
        SchemaKind::Any => {}
        SchemaKind::String => {
            out.insert("type".into(), "string".into());
        }
        SchemaKind::Number => {
            out.insert("type".into(), "number".into());
        }
        SchemaKind::Integer => {
            out.insert("type".into(), "integer".into());
        }
        SchemaKind::Boolean => {
            out.insert("type".into(), "boolean".into());
        }
        SchemaKind::Date => {
            out.insert("type".into(), "string".into());
            out.insert("format".into(), "date-time".into());
        }
        SchemaKind::Object => {
            out.insert("type".into(), "object".into());
            let properties: Map<String, Value> = schema
                .keys
                .iter()
                .map(|(name, child)| (name.clone(), compile_node(child, components)))
                .collect();
            out.insert("properties".into(), Value::Object(properties));
            let required: Vec<Value> = schema.required_keys().map(Value::from).collect();
            if !required.is_empty() {
                out.insert("required".into(), Value::Array(required));
            }
        }
        SchemaKind::Array => {
            out.insert("type".into(), "array".into());
            let items = schema
                .items
                .as_deref()
                .map_or_else(|| Value::Object(Map::new()), |items| compile_node(items, components));
            out.insert("items".into(), items);
        }
        SchemaKind::Alternatives => {
            let candidates: Vec<Value> = schema
                .alternatives
                .iter()
                .map(|candidate| compile_node(candidate, components))
                .collect();
            out.insert("anyOf".into(), Value::Array(candidates));
        }
    }

    if let Some(format) = &schema.format {
        if schema.kind != SchemaKind::Date {
            out.insert("format".into(), format.clone().into());
        }
    }
    if let Some(pattern) = &schema.pattern {
        out.insert("pattern".into(), pattern.clone().into());
    }
    insert_bounds(schema, &mut out);
    if !schema.valid.is_empty() {
        out.insert("enum".into(), Value::Array(schema.valid.clone()));
    }
    if schema.allow_null {
        out.insert("nullable".into(), true.into());
    }
    if let Some(description) = &schema.description {
        out.insert("description".into(), description.clone().into());
    }
    if let Some(default) = &schema.default {
        out.insert("default".into(), default.clone());
    }
    if let Some(example) = &schema.example {
        out.insert("example".into(), example.clone());
    }

    match &schema.name {
        Some(name) => {
            components.push((name.clone(), Value::Object(out)));
            schema_ref(name)
        }
        None => Value::Object(out),
    }
}

fn insert_bounds(schema: &Schema, out: &mut Map<String, Value>) {
    let (min_key, max_key) = match schema.kind {
        SchemaKind::String => ("minLength", "maxLength"),
        SchemaKind::Array => ("minItems", "maxItems"),
        SchemaKind::Object => ("minProperties", "maxProperties"),
        SchemaKind::Number | SchemaKind::Integer => ("minimum", "maximum"),
        SchemaKind::Any | SchemaKind::Boolean | SchemaKind::Date | SchemaKind::Alternatives => {
            return
        }
    };
    if let Some(min) = schema.min {
        out.insert(min_key.into(), min.into());
    }
    if let Some(max) = schema.max {
        out.insert(max_key.into(), max.into());
    }
}
