#![deny(missing_docs)]

//! # Structural Schemas
//!
//! A small shape model (fields, types, formats, examples) independent of any runtime
//! validator, and its rendering into the JSON Schema form embedded in OpenAPI 3.1.
//!
//! Component references are kept as references (`$ref: '#/components/schemas/Name'`);
//! unions render as `anyOf` with members in declaration order.

use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Prefix used for component schema references.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// A structural schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// The shape of the value.
    pub kind: SchemaKind,
    /// Optional human readable description.
    pub description: Option<String>,
    /// Optional format hint (e.g. `uuid`, `int32`, `date-time`).
    pub format: Option<String>,
    /// Optional example value.
    pub example: Option<Value>,
    /// Allowed values (rendered as `enum`), empty when unrestricted.
    pub enum_values: Vec<Value>,
}

/// The shape of a `Schema`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Reference to a registered component schema by name.
    Reference(String),
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// Homogeneous array.
    Array(Box<Schema>),
    /// Object with named fields in declaration order.
    Object(Vec<Field>),
    /// One of several possible shapes.
    AnyOf(Vec<Schema>),
}

/// A named field of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property name.
    pub name: String,
    /// Property shape.
    pub schema: Schema,
    /// Whether the property must be present.
    pub required: bool,
}

impl Field {
    /// A field that must be present.
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
        }
    }

    /// A field that may be omitted.
    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: false,
        }
    }
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            format: None,
            example: None,
            enum_values: Vec::new(),
        }
    }

    /// Reference to a component schema.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::of(SchemaKind::Reference(name.into()))
    }

    /// String schema.
    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    /// Integer schema.
    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    /// Number schema.
    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    /// Boolean schema.
    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    /// Array schema.
    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array(Box::new(items)))
    }

    /// Object schema with the given fields.
    pub fn object(fields: Vec<Field>) -> Self {
        Self::of(SchemaKind::Object(fields))
    }

    /// Union of several shapes.
    pub fn any_of(members: Vec<Schema>) -> Self {
        Self::of(SchemaKind::AnyOf(members))
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the format hint.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the example.
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Restricts the allowed values.
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = values;
        self
    }

    /// Renders this schema as a JSON Schema value.
    pub fn to_json_schema(&self) -> Value {
        let mut obj = Map::new();

        match &self.kind {
            SchemaKind::Reference(name) => {
                obj.insert(
                    "$ref".to_string(),
                    json!(format!("{}{}", COMPONENT_SCHEMA_PREFIX, name)),
                );
            }
            SchemaKind::String => {
                obj.insert("type".to_string(), json!("string"));
            }
            SchemaKind::Integer => {
                obj.insert("type".to_string(), json!("integer"));
            }
            SchemaKind::Number => {
                obj.insert("type".to_string(), json!("number"));
            }
            SchemaKind::Boolean => {
                obj.insert("type".to_string(), json!("boolean"));
            }
            SchemaKind::Array(items) => {
                obj.insert("type".to_string(), json!("array"));
                obj.insert("items".to_string(), items.to_json_schema());
            }
            SchemaKind::Object(fields) => {
                obj.insert("type".to_string(), json!("object"));
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in fields {
                    properties.insert(field.name.clone(), field.schema.to_json_schema());
                    if field.required {
                        required.push(Value::String(field.name.clone()));
                    }
                }
                obj.insert("properties".to_string(), Value::Object(properties));
                if !required.is_empty() {
                    obj.insert("required".to_string(), Value::Array(required));
                }
            }
            SchemaKind::AnyOf(members) => {
                let rendered = members.iter().map(Schema::to_json_schema).collect();
                obj.insert("anyOf".to_string(), Value::Array(rendered));
            }
        }

        if let Some(format) = &self.format {
            obj.insert("format".to_string(), json!(format));
        }
        if !self.enum_values.is_empty() {
            obj.insert("enum".to_string(), Value::Array(self.enum_values.clone()));
        }
        if let Some(desc) = &self.description {
            obj.insert("description".to_string(), json!(desc));
        }
        if let Some(example) = &self.example {
            obj.insert("example".to_string(), example.clone());
        }

        Value::Object(obj)
    }

    /// Collects every component name referenced anywhere inside this schema,
    /// in depth-first declaration order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.kind {
            SchemaKind::Reference(name) => out.push(name),
            SchemaKind::Array(items) => items.collect_references(out),
            SchemaKind::Object(fields) => {
                for field in fields {
                    field.schema.collect_references(out);
                }
            }
            SchemaKind::AnyOf(members) => {
                for member in members {
                    member.collect_references(out);
                }
            }
            SchemaKind::String | SchemaKind::Integer | SchemaKind::Number | SchemaKind::Boolean => {}
        }
    }

    /// Returns a message for each shape defect (duplicate field names, empty unions).
    ///
    /// `context` prefixes each message, e.g. the component name.
    pub fn shape_problems(&self, context: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_shape_problems(context, &mut out);
        out
    }

    fn collect_shape_problems(&self, context: &str, out: &mut Vec<String>) {
        match &self.kind {
            SchemaKind::Array(items) => {
                items.collect_shape_problems(&format!("{}.items", context), out)
            }
            SchemaKind::Object(fields) => {
                let mut seen = HashSet::new();
                for field in fields {
                    if field.name.is_empty() {
                        out.push(format!("{} declares a field with an empty name", context));
                    } else if !seen.insert(field.name.as_str()) {
                        out.push(format!(
                            "{} declares field '{}' more than once",
                            context, field.name
                        ));
                    }
                    field
                        .schema
                        .collect_shape_problems(&format!("{}.{}", context, field.name), out);
                }
            }
            SchemaKind::AnyOf(members) => {
                if members.is_empty() {
                    out.push(format!("{} is a union with no members", context));
                }
                for (idx, member) in members.iter().enumerate() {
                    member.collect_shape_problems(&format!("{}.anyOf[{}]", context, idx), out);
                }
            }
            SchemaKind::Reference(_)
            | SchemaKind::String
            | SchemaKind::Integer
            | SchemaKind::Number
            | SchemaKind::Boolean => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn movie() -> Schema {
        Schema::object(vec![
            Field::required("id", Schema::string().with_format("uuid")),
            Field::required("name", Schema::string().with_example(json!("Inception"))),
            Field::optional("year", Schema::integer()),
        ])
    }

    #[test]
    fn test_object_renders_properties_and_required_in_order() {
        let schema = movie().to_json_schema();

        assert_eq!(schema["type"], "object");
        let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "name", "year"]);
        assert_eq!(schema["required"], json!(["id", "name"]));
        assert_eq!(schema["properties"]["id"]["format"], "uuid");
        assert_eq!(schema["properties"]["name"]["example"], "Inception");
    }

    #[test]
    fn test_object_without_required_fields_omits_required() {
        let schema = Schema::object(vec![Field::optional("name", Schema::string())]);
        let rendered = schema.to_json_schema();
        assert!(!rendered.as_object().unwrap().contains_key("required"));
    }

    #[test]
    fn test_reference_renders_component_pointer() {
        let rendered = Schema::reference("Movie").to_json_schema();
        assert_eq!(rendered, json!({ "$ref": "#/components/schemas/Movie" }));
    }

    #[test]
    fn test_any_of_keeps_member_order() {
        let union = Schema::any_of(vec![Schema::reference("Movie"), Schema::reference("NotFound")]);
        assert_eq!(
            union.to_json_schema(),
            json!({
                "anyOf": [
                    { "$ref": "#/components/schemas/Movie" },
                    { "$ref": "#/components/schemas/NotFound" }
                ]
            })
        );
    }

    #[test]
    fn test_enum_and_description() {
        let status = Schema::string()
            .with_enum(vec![json!("ok"), json!("error")])
            .with_description("Outcome");
        let rendered = status.to_json_schema();
        assert_eq!(rendered["enum"], json!(["ok", "error"]));
        assert_eq!(rendered["description"], "Outcome");
    }

    #[test]
    fn test_references_are_collected_recursively() {
        let schema = Schema::object(vec![
            Field::required("data", Schema::array(Schema::reference("Movie"))),
            Field::required(
                "fallback",
                Schema::any_of(vec![Schema::reference("NotFound"), Schema::string()]),
            ),
        ]);
        assert_eq!(schema.references(), vec!["Movie", "NotFound"]);
    }

    #[test]
    fn test_shape_problems_report_duplicates_and_empty_unions() {
        let schema = Schema::object(vec![
            Field::required("id", Schema::string()),
            Field::optional("id", Schema::integer()),
            Field::required("choice", Schema::any_of(vec![])),
        ]);
        let problems = schema.shape_problems("Broken");
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("field 'id' more than once"));
        assert!(problems[1].contains("Broken.choice is a union with no members"));
    }

    #[test]
    fn test_well_formed_schema_has_no_shape_problems() {
        assert!(movie().shape_problems("Movie").is_empty());
    }
}
