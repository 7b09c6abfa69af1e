//! Plain descriptor records produced by route collectors.
//!
//! Every record derives `serde` traits so a collector can hand them over as
//! JSON or YAML. Field names follow the Swagger vocabulary where one exists
//! (`in`, `type`), and the annotation list is externally tagged:
//!
//! ```yaml
//! - mapping: { path: "{id}", methods: [GET], summary: Fetch user }
//! - param: { in: path, name: id, required: true, type: integer }
//! - response: { code: 200, description: OK, schema: { id: 1 } }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::example::ExampleValue;

/// Identifies one route handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Fully qualified handler type name (e.g., `App\Controller\UserController`).
    pub type_name: String,
    /// Handler method name (e.g., `info`).
    pub method_name: String,
    /// Path prefix every relative mapping path is joined to (e.g., `/user`).
    pub path_prefix: String,
}

impl RouteDescriptor {
    /// Create a descriptor from its three parts.
    #[must_use]
    pub fn new(type_name: &str, method_name: &str, path_prefix: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            method_name: method_name.to_string(),
            path_prefix: path_prefix.to_string(),
        }
    }
}

/// Class-level metadata shared by every handler of one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerMeta {
    /// Explicit tag. Falls back to the type name when absent or empty.
    pub tag: Option<String>,
    /// Tag description.
    pub description: String,
}

impl ControllerMeta {
    /// Metadata with an explicit tag and description.
    #[must_use]
    pub fn new(tag: &str, description: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            description: description.to_string(),
        }
    }
}

/// Route mapping: path, HTTP methods, and operation texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingInfo {
    /// Mapping path. Empty means "the prefix itself"; no leading `/` means
    /// "relative to the prefix"; a leading `/` overrides the prefix.
    #[serde(default)]
    pub path: String,
    /// HTTP methods in declaration order.
    #[serde(default = "default_methods", alias = "http_methods")]
    pub methods: Vec<String>,
    /// Operation summary.
    #[serde(default)]
    pub summary: String,
    /// Operation description.
    #[serde(default)]
    pub description: String,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

impl MappingInfo {
    /// Mapping for `path` answering the given HTTP methods.
    #[must_use]
    pub fn new(path: &str, methods: &[&str]) -> Self {
        Self {
            path: path.to_string(),
            methods: methods.iter().map(ToString::to_string).collect(),
            summary: String::new(),
            description: String::new(),
        }
    }

    /// Set the operation summary.
    #[must_use]
    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    /// Set the operation description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Where a parameter is read from (`in` in Swagger terms).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamLocation {
    /// `?name=value`
    #[default]
    Query,
    /// `/users/{id}`
    Path,
    /// Request header.
    Header,
    /// `application/x-www-form-urlencoded` or multipart field.
    FormData,
    /// JSON request body.
    Body,
    /// Any other location, kept verbatim.
    Other(String),
}

impl ParamLocation {
    /// Swagger spelling of the location.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
            Self::Header => "header",
            Self::FormData => "formData",
            Self::Body => "body",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for ParamLocation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "query" => Self::Query,
            "path" => Self::Path,
            "header" => Self::Header,
            "formData" => Self::FormData,
            "body" => Self::Body,
            _ => Self::Other(value),
        }
    }
}

impl From<ParamLocation> for String {
    fn from(value: ParamLocation) -> Self {
        match value {
            ParamLocation::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a body parameter's rule map.
///
/// Flat rules are pipe-delimited token strings (`required|int|between:1,100`).
/// Anything else is kept as a raw value and documented as a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rule {
    /// Pipe-delimited validation tokens.
    Flat(String),
    /// Nested rule structure (not expanded).
    Nested(serde_json::Value),
}

impl From<&str> for Rule {
    fn from(value: &str) -> Self {
        Self::Flat(value.to_string())
    }
}

/// A single operation parameter.
///
/// A parameter carrying `rules` is a body parameter: its schema is derived
/// from the rule map instead of its primitive `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name. Unique per operation.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in", default)]
    pub location: ParamLocation,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Primitive Swagger type (`string`, `integer`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Default value. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub default: Option<serde_json::Value>,
    /// `field[|label]` → rule map for body parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<IndexMap<String, Rule>>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl ParamDescriptor {
    /// Optional parameter with no type, default or rules.
    #[must_use]
    pub fn new(name: &str, location: ParamLocation) -> Self {
        Self {
            name: name.to_string(),
            location,
            description: String::new(),
            required: false,
            param_type: None,
            default: None,
            rules: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Mark the parameter required (or not).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the primitive type.
    #[must_use]
    pub fn param_type(mut self, param_type: &str) -> Self {
        self.param_type = Some(param_type.to_string());
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn default_value(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Attach a rule map, turning this into a body parameter.
    #[must_use]
    pub fn rules<K, R>(mut self, rules: impl IntoIterator<Item = (K, R)>) -> Self
    where
        K: Into<String>,
        R: Into<Rule>,
    {
        self.rules = Some(
            rules
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        );
        self
    }

    /// Whether this parameter describes a rule-validated request body.
    #[must_use]
    pub fn is_body(&self) -> bool {
        self.rules.is_some()
    }
}

/// Body parameter as declared by a collector.
///
/// Converted into a [`ParamDescriptor`] located in `body` with `rules` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParamDescriptor {
    /// Parameter name.
    #[serde(default = "default_body_name")]
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the body is mandatory.
    #[serde(default)]
    pub required: bool,
    /// `field[|label]` → rule map.
    #[serde(default)]
    pub rules: IndexMap<String, Rule>,
}

fn default_body_name() -> String {
    "body".to_string()
}

impl From<BodyParamDescriptor> for ParamDescriptor {
    fn from(body: BodyParamDescriptor) -> Self {
        Self {
            name: body.name,
            location: ParamLocation::Body,
            description: body.description,
            required: body.required,
            param_type: None,
            default: None,
            rules: Some(body.rules),
        }
    }
}

/// One documented response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    /// HTTP status code.
    #[serde(alias = "status_code")]
    pub code: u16,
    /// Response description.
    #[serde(default)]
    pub description: String,
    /// Literal example payload used to infer the response schema.
    #[serde(default, alias = "example", skip_serializing_if = "Option::is_none")]
    pub schema: Option<ExampleValue>,
}

impl ResponseDescriptor {
    /// Response without an example payload.
    #[must_use]
    pub fn new(code: u16, description: &str) -> Self {
        Self {
            code,
            description: description.to_string(),
            schema: None,
        }
    }

    /// Attach an example payload.
    #[must_use]
    pub fn example(mut self, payload: impl Into<ExampleValue>) -> Self {
        self.schema = Some(payload.into());
        self
    }
}

/// One item of a handler's flat metadata list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// Route mapping. Exactly one is expected; the last one wins.
    Mapping(MappingInfo),
    /// Query, path, header or form parameter.
    Param(ParamDescriptor),
    /// Rule-validated request body.
    Body(BodyParamDescriptor),
    /// Documented response.
    Response(ResponseDescriptor),
}

impl From<MappingInfo> for Annotation {
    fn from(value: MappingInfo) -> Self {
        Self::Mapping(value)
    }
}

impl From<ParamDescriptor> for Annotation {
    fn from(value: ParamDescriptor) -> Self {
        Self::Param(value)
    }
}

impl From<BodyParamDescriptor> for Annotation {
    fn from(value: BodyParamDescriptor) -> Self {
        Self::Body(value)
    }
}

impl From<ResponseDescriptor> for Annotation {
    fn from(value: ResponseDescriptor) -> Self {
        Self::Response(value)
    }
}
