//! Example payloads → named, registered definition trees.
//!
//! Every mapping or sequence nested in the payload becomes its own
//! definition, named `<parent><Key>` where `Key` is the entry key with
//! underscores removed and the first character upper-cased. Sequences are
//! described by their first element only.
//!
//! Two branches deriving the same name overwrite each other (for example
//! `a_b` and `ab` under one parent). The overwrite is reported as a
//! [`Collision::Definition`](crate::Collision::Definition).

use apidog_core::ExampleValue;

use crate::document::DocumentStore;
use crate::error;
use crate::model::{definition_ref, Schema};

use super::helpers::{clean_key, ucfirst};

/// Infer and register the definition for `value` under `model_name`.
///
/// Returns `Ok(None)` when a top-level (`depth == 0`) payload is empty or
/// a bare scalar: there is nothing to describe and nothing is registered.
/// At depth 0 the result is registered under `model_name`; deeper results
/// are returned for the caller to register under its derived name.
///
/// # Errors
///
/// Fails only under [`CollisionPolicy::Deny`](crate::CollisionPolicy::Deny).
pub fn infer_definition(
    doc: &mut DocumentStore,
    value: &ExampleValue,
    model_name: &str,
    depth: usize,
) -> error::Result<Option<Schema>> {
    if depth == 0 && (value.is_empty() || !value.is_container()) {
        return Ok(None);
    }

    let mut definition = Schema::object();
    for (key, val) in value.entries() {
        let property = infer_property(doc, &key, val, model_name, depth)?;
        definition.set_property(&key, property);
    }

    if depth == 0 {
        doc.set_definition(model_name, definition.clone())?;
    }
    Ok(Some(definition))
}

/// Describe one entry of a mapping (or one indexed element of a sequence).
fn infer_property(
    doc: &mut DocumentStore,
    key: &str,
    val: &ExampleValue,
    model_name: &str,
    depth: usize,
) -> error::Result<Schema> {
    let nested_name = || format!("{model_name}{}", ucfirst(&clean_key(key)));

    let property = match val {
        ExampleValue::Sequence(items) => {
            let items = match items.first() {
                Some(first) if first.is_container() => {
                    let name = nested_name();
                    register_nested(doc, first, &name, depth)?;
                    Some(Box::new(Schema::reference_to(&name)))
                }
                Some(first) => Some(Box::new(Schema::of_type(first.type_name()))),
                None => None,
            };
            Schema {
                items,
                ..Schema::of_type("array")
            }
        }
        ExampleValue::Mapping(_) => {
            let name = nested_name();
            register_nested(doc, val, &name, depth)?;
            Schema {
                reference: Some(definition_ref(&name)),
                ..Schema::of_type("object")
            }
        }
        scalar => Schema {
            default: Some(scalar.to_json()),
            ..Schema::of_type(scalar.type_name())
        },
    };
    Ok(property)
}

/// Infer a nested container one level deeper and register it under `name`.
fn register_nested(
    doc: &mut DocumentStore,
    value: &ExampleValue,
    name: &str,
    depth: usize,
) -> error::Result<()> {
    let definition = infer_definition(doc, value, name, depth + 1)?.unwrap_or_else(Schema::object);
    doc.set_definition(name, definition)
}
