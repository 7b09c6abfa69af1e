//! Validation-rule strings → Swagger types and body schemas.
//!
//! Rules are pipe-delimited token lists such as `required|int|between:1,100`.
//! Only token membership matters; the grammar is not validated.

use std::borrow::Cow;
use std::fmt;

use apidog_core::Rule;
use indexmap::IndexMap;

use crate::document::DocumentStore;
use crate::error;
use crate::model::Schema;

/// Placeholder definition referenced by array-typed rule fields.
pub const MODEL_ARRAY: &str = "ModelArray";

/// Placeholder definition referenced by object-typed rule fields.
pub const MODEL_OBJECT: &str = "ModelObject";

/// Tokens that classify a rule as `integer`.
const INTEGER_TOKENS: &[&str] = &["int", "lt", "gt", "ge"];

/// Primitive type inferred from a rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// `integer`
    Integer,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `string`
    String,
}

impl RuleType {
    /// Swagger type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Array => "array",
            Self::Object => "object",
            Self::String => "string",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a rule string.
///
/// Checks run in a fixed order and the first hit wins: integer tokens,
/// then `array`, then `object`; anything else is `string`. So
/// `int|array` is `integer`.
#[must_use]
pub fn rule_type(rule: &str) -> RuleType {
    let stripped = strip_quantifiers(rule);
    let tokens: Vec<&str> = stripped.split('|').collect();

    if tokens.iter().any(|t| INTEGER_TOKENS.contains(t)) {
        RuleType::Integer
    } else if tokens.contains(&"array") {
        RuleType::Array
    } else if tokens.contains(&"object") {
        RuleType::Object
    } else {
        RuleType::String
    }
}

/// Remove the span from the first `[` to the last `]`.
///
/// `string|between[1,20]|max:20` → `string|between|max:20`
fn strip_quantifiers(rule: &str) -> Cow<'_, str> {
    let Some(start) = rule.find('[') else {
        return Cow::Borrowed(rule);
    };
    let Some(end) = rule.rfind(']').filter(|&end| end > start) else {
        return Cow::Borrowed(rule);
    };
    Cow::Owned(format!("{}{}", &rule[..start], &rule[end + 1..]))
}

/// Build an object schema from a `field[|label]` → rule map.
///
/// The label becomes the property description (empty when absent).
/// Nested rule structures are not expanded and document as `string`.
#[must_use]
pub fn rules_to_schema(rules: &IndexMap<String, Rule>) -> Schema {
    let mut schema = Schema {
        required: Some(Vec::new()),
        ..Schema::object()
    };

    for (field, rule) in rules {
        let (name, label) = field.split_once('|').unwrap_or((field.as_str(), ""));
        let ty = match rule {
            Rule::Flat(rule) => rule_type(rule),
            Rule::Nested(_) => RuleType::String,
        };

        let reference = match ty {
            RuleType::Array => Some(crate::model::definition_ref(MODEL_ARRAY)),
            RuleType::Object => Some(crate::model::definition_ref(MODEL_OBJECT)),
            RuleType::Integer | RuleType::String => None,
        };

        schema.set_property(
            name,
            Schema {
                reference,
                schema_type: Some(ty.as_str().to_string()),
                description: Some(label.to_string()),
                ..Schema::default()
            },
        );
    }

    schema
}

/// The two placeholder definitions: array-of-string and object-of-string.
#[must_use]
pub fn placeholder_models() -> [(&'static str, Schema); 2] {
    let model = |ty: &str| Schema {
        required: Some(Vec::new()),
        items: Some(Box::new(Schema::of_type("string"))),
        ..Schema::of_type(ty)
    };
    [(MODEL_ARRAY, model("array")), (MODEL_OBJECT, model("object"))]
}

/// (Re-)insert the placeholder definitions.
///
/// # Errors
///
/// Fails only under a deny policy when a seeded definition with the same
/// name differs.
pub fn init_models(doc: &mut DocumentStore) -> error::Result<()> {
    for (name, schema) in placeholder_models() {
        doc.set_definition(name, schema)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_family() {
        assert_eq!(rule_type("required|int|between:1,100"), RuleType::Integer);
        assert_eq!(rule_type("gt:0"), RuleType::String);
        assert_eq!(rule_type("required|gt"), RuleType::Integer);
        assert_eq!(rule_type("lt|max:3"), RuleType::Integer);
        assert_eq!(rule_type("ge"), RuleType::Integer);
    }

    #[test]
    fn array_and_object() {
        assert_eq!(rule_type("required|array"), RuleType::Array);
        assert_eq!(rule_type("object"), RuleType::Object);
        assert_eq!(rule_type("array|object"), RuleType::Array);
    }

    #[test]
    fn integer_wins_over_array() {
        assert_eq!(rule_type("int|array"), RuleType::Integer);
        assert_eq!(rule_type("array|int"), RuleType::Integer);
    }

    #[test]
    fn everything_else_is_string() {
        assert_eq!(rule_type("string|max:20"), RuleType::String);
        assert_eq!(rule_type("integer"), RuleType::String);
        assert_eq!(rule_type(""), RuleType::String);
        assert_eq!(rule_type("|||"), RuleType::String);
    }

    #[test]
    fn bracket_segments_are_ignored() {
        assert_eq!(rule_type("string|length[int]"), RuleType::String);
        assert_eq!(rule_type("int[1,2]|array"), RuleType::Integer);
        assert_eq!(strip_quantifiers("a[1]b[2]c"), "ac");
        assert_eq!(strip_quantifiers("a]b[c"), "a]b[c");
    }

    #[test]
    fn labelled_field_becomes_description() {
        let rules: IndexMap<String, Rule> =
            [("name|Name".to_string(), Rule::from("required|string"))].into();
        let schema = rules_to_schema(&rules);

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "required": [],
                "properties": {
                    "name": {"type": "string", "description": "Name"}
                }
            })
        );
    }

    #[test]
    fn array_and_object_fields_reference_placeholders() {
        let rules: IndexMap<String, Rule> = [
            ("ids".to_string(), Rule::from("required|array")),
            ("meta|Extra".to_string(), Rule::from("object")),
            ("age".to_string(), Rule::from("int")),
        ]
        .into();
        let schema = rules_to_schema(&rules);

        let ids = schema.property("ids").unwrap();
        assert_eq!(ids.reference.as_deref(), Some("#/definitions/ModelArray"));
        assert_eq!(ids.schema_type.as_deref(), Some("array"));
        assert_eq!(ids.description.as_deref(), Some(""));

        let meta = schema.property("meta").unwrap();
        assert_eq!(meta.reference.as_deref(), Some("#/definitions/ModelObject"));
        assert_eq!(meta.description.as_deref(), Some("Extra"));

        let age = schema.property("age").unwrap();
        assert!(age.reference.is_none());
        assert_eq!(age.schema_type.as_deref(), Some("integer"));
    }

    #[test]
    fn nested_rules_degrade_to_string() {
        let rules: IndexMap<String, Rule> = [(
            "address|Address".to_string(),
            Rule::Nested(json!({"city": "required|array"})),
        )]
        .into();
        let schema = rules_to_schema(&rules);
        let address = schema.property("address").unwrap();
        assert_eq!(address.schema_type.as_deref(), Some("string"));
        assert!(address.reference.is_none());
    }

    #[test]
    fn label_keeps_everything_after_first_pipe() {
        let rules: IndexMap<String, Rule> =
            [("code|Code|legacy".to_string(), Rule::from("string"))].into();
        let schema = rules_to_schema(&rules);
        assert_eq!(
            schema.property("code").unwrap().description.as_deref(),
            Some("Code|legacy")
        );
    }

    #[test]
    fn placeholder_shapes() {
        let mut doc = DocumentStore::new();
        init_models(&mut doc).unwrap();
        assert_eq!(
            serde_json::to_value(doc.definition(MODEL_ARRAY).unwrap()).unwrap(),
            json!({"type": "array", "required": [], "items": {"type": "string"}})
        );
        assert_eq!(
            serde_json::to_value(doc.definition(MODEL_OBJECT).unwrap()).unwrap(),
            json!({"type": "object", "required": [], "items": {"type": "string"}})
        );

        init_models(&mut doc).unwrap();
        assert!(doc.collisions().is_empty());
    }
}
