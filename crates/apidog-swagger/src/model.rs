//! Swagger 2.0 object model.
//!
//! Only the subset the generator writes is typed. Keys outside that subset
//! survive in each object's flattened `extra` map, and path entries seeded
//! from a skeleton are kept as raw JSON ([`PathEntry::Seeded`]).

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Media type used for every generated operation.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// `#/definitions/<name>` reference string.
#[must_use]
pub fn definition_ref(name: &str) -> String {
    format!("#/definitions/{name}")
}

/// A tag entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag name (its identity).
    pub name: String,
    /// Tag description.
    pub description: String,
}

/// A schema object (definition, property, or `items`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// `$ref` to another definition.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Swagger type name.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example hint. `Some(Value::Null)` serializes as `null`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub default: Option<Value>,
    /// Required property names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Element schema for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Object properties in insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Keys outside the typed subset.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keep an explicit `null` as `Some(Value::Null)` instead of `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Schema {
    /// Schema of a bare type.
    #[must_use]
    pub fn of_type(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    /// Schema that only references a definition.
    #[must_use]
    pub fn reference_to(name: &str) -> Self {
        Self {
            reference: Some(definition_ref(name)),
            ..Self::default()
        }
    }

    /// Empty object schema with a `properties` map ready to fill.
    #[must_use]
    pub fn object() -> Self {
        Self {
            schema_type: Some("object".to_string()),
            properties: Some(IndexMap::new()),
            ..Self::default()
        }
    }

    /// Property schema by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref()?.get(name)
    }

    /// Insert or overwrite a property.
    pub fn set_property(&mut self, name: &str, property: Schema) {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), property);
    }
}

/// A parameter object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Location (`query`, `path`, `header`, `formData`, `body`).
    #[serde(rename = "in")]
    pub location: String,
    /// Parameter name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Primitive type. Absent on body parameters.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Default value. `Some(Value::Null)` serializes as `null`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub default: Option<Value>,
    /// Body schema reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Keys outside the typed subset (`format`, `enum`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A response object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Inferred schema reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Keys outside the typed subset (`headers`, `examples`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An operation object (one path + method).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    /// Tag names (always exactly one for generated operations).
    pub tags: Vec<String>,
    /// Operation summary.
    pub summary: String,
    /// Parameters in first-declaration order.
    pub parameters: Vec<Parameter>,
    /// Request media types.
    pub consumes: Vec<String>,
    /// Response media types.
    pub produces: Vec<String>,
    /// Responses keyed by status code.
    pub responses: IndexMap<String, Response>,
    /// Operation description.
    pub description: String,
    /// Keys outside the typed subset (`operationId`, `security`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Operation {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            summary: String::new(),
            parameters: Vec::new(),
            consumes: vec![JSON_MEDIA_TYPE.to_string()],
            produces: vec![JSON_MEDIA_TYPE.to_string()],
            responses: IndexMap::new(),
            description: String::new(),
            extra: Map::new(),
        }
    }
}

/// One key of a path item.
///
/// Generated operations are typed. Everything read from a skeleton stays
/// raw: seeded operations keep exactly the fields they were written with,
/// and non-method keys such as path-level `parameters` or `$ref` pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathEntry {
    /// An operation registered by the generator.
    Operation(Operation),
    /// A value seeded from the skeleton.
    Seeded(Value),
}

impl PathEntry {
    /// The generated operation, if this entry holds one.
    #[must_use]
    pub fn as_operation(&self) -> Option<&Operation> {
        match self {
            Self::Operation(operation) => Some(operation),
            Self::Seeded(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for PathEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::Seeded)
    }
}

/// `method (or other path-item key) → entry`.
pub type PathItem = IndexMap<String, PathEntry>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn reference_serializes_as_dollar_ref() {
        let schema = Schema::reference_to("ModelArray");
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"$ref": "#/definitions/ModelArray"})
        );
    }

    #[test]
    fn null_default_is_kept() {
        let schema = Schema {
            default: Some(Value::Null),
            ..Schema::of_type("null")
        };
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"type": "null", "default": null}));

        let back: Schema = serde_json::from_value(value).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn unknown_schema_keys_survive() {
        let schema: Schema =
            serde_json::from_value(json!({"type": "string", "format": "date-time"})).unwrap();
        assert_eq!(schema.extra["format"], "date-time");
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "string", "format": "date-time"})
        );
    }

    #[test]
    fn parameter_keeps_unknown_keys_and_null_default() {
        let raw = json!({
            "in": "query",
            "name": "sort",
            "description": "",
            "required": false,
            "type": "string",
            "default": null,
            "enum": ["asc", "desc"],
        });
        let parameter: Parameter = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parameter.default, Some(Value::Null));
        assert_eq!(parameter.extra["enum"], json!(["asc", "desc"]));
        assert_eq!(serde_json::to_value(&parameter).unwrap(), raw);
    }

    #[test]
    fn path_item_reads_every_key_as_seeded() {
        let item: PathItem = serde_json::from_value(json!({
            "parameters": [{"in": "path", "name": "id", "required": true, "type": "string"}],
            "get": {"operationId": "getItem", "responses": {"200": {"description": "ok"}}},
        }))
        .unwrap();
        assert!(matches!(item["parameters"], PathEntry::Seeded(Value::Array(_))));
        assert!(item["get"].as_operation().is_none());
    }

    #[test]
    fn generated_entry_serializes_as_operation() {
        let entry = PathEntry::Operation(Operation {
            summary: "List".to_string(),
            ..Operation::default()
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["summary"], "List");
        assert_eq!(value["consumes"], json!(["application/json"]));
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn operation_defaults_to_json_media() {
        let op = Operation::default();
        assert_eq!(op.consumes, vec!["application/json"]);
        assert_eq!(op.produces, vec!["application/json"]);
    }
}
