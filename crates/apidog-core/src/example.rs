//! Closed value union for example payloads.
//!
//! Example payloads are literal sample responses. They are decoded once at
//! the collector boundary into [`ExampleValue`], and schema inference works
//! on this union only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A decoded example payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ExampleValue {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer or floating point number.
    Number(Number),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<ExampleValue>),
    /// Insertion-ordered mapping.
    Mapping(IndexMap<String, ExampleValue>),
}

impl ExampleValue {
    /// Whether the value counts as empty.
    ///
    /// `null`, `false`, zero, `""`, `"0"`, and empty containers are empty.
    /// An empty payload produces no schema.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
            Self::String(s) => s.is_empty() || s == "0",
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(entries) => entries.is_empty(),
        }
    }

    /// Whether the value is a sequence or a mapping.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Swagger type name of the value's runtime kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(n) if n.is_f64() => "number",
            Self::Number(_) => "integer",
            Self::String(_) => "string",
            Self::Sequence(_) => "array",
            Self::Mapping(_) => "object",
        }
    }

    /// Child entries keyed by name.
    ///
    /// Sequences are keyed by their decimal index. Scalars have no entries.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, &ExampleValue)> {
        match self {
            Self::Mapping(entries) => entries.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Self::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Convert back into a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::from(self.clone())
    }
}

impl From<Value> for ExampleValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ExampleValue> for Value {
    fn from(value: ExampleValue) -> Self {
        match value {
            ExampleValue::Null => Value::Null,
            ExampleValue::Bool(b) => Value::Bool(b),
            ExampleValue::Number(n) => Value::Number(n),
            ExampleValue::String(s) => Value::String(s),
            ExampleValue::Sequence(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            ExampleValue::Mapping(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
