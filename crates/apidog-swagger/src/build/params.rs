//! Parameter descriptors → Swagger parameter objects.

use apidog_core::ParamDescriptor;
use indexmap::IndexMap;

use crate::document::{Collision, DocumentStore};
use crate::error;
use crate::model::{Parameter, Schema};

use super::helpers::{clean_path, path_model_name};
use super::rules::{init_models, rules_to_schema};

/// Build the parameter list for one operation.
///
/// Parameters are keyed by name: a later parameter with the same name
/// replaces the earlier one in its original position. Whether that
/// collapse is deliberate deduplication is unknown, so it is kept as-is and
/// reported as a [`Collision::Parameter`].
///
/// A body parameter registers its rule schema under the path model name
/// (`/user/{id}` → `UserId`) and references it instead of carrying a
/// primitive `type`. An empty rule map attaches no schema.
///
/// # Errors
///
/// Fails only under [`CollisionPolicy::Deny`](crate::CollisionPolicy::Deny).
pub fn make_parameters(
    doc: &mut DocumentStore,
    params: &[ParamDescriptor],
    path: &str,
) -> error::Result<Vec<Parameter>> {
    init_models(doc)?;
    let model_name = path_model_name(&clean_path(path));

    let mut parameters: IndexMap<String, Parameter> = IndexMap::new();
    for item in params {
        let mut parameter = Parameter {
            location: item.location.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            required: item.required,
            param_type: item.param_type.clone(),
            default: item.default.clone(),
            ..Parameter::default()
        };

        if let Some(rules) = item.rules.as_ref().filter(|rules| !rules.is_empty()) {
            doc.set_definition(&model_name, rules_to_schema(rules))?;
            parameter.param_type = None;
            parameter.schema = Some(Schema::reference_to(&model_name));
        }

        if parameters
            .get(&item.name)
            .is_some_and(|existing| *existing != parameter)
        {
            doc.record_collision(Collision::Parameter {
                path: path.to_string(),
                name: item.name.clone(),
            })?;
        }
        parameters.insert(item.name.clone(), parameter);
    }

    Ok(parameters.into_values().collect())
}

#[cfg(test)]
mod tests {
    use apidog_core::ParamLocation;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::CollisionPolicy;
    use crate::error::Error;

    #[test]
    fn plain_parameters_keep_their_fields() {
        let mut doc = DocumentStore::new();
        let params = vec![
            ParamDescriptor::new("id", ParamLocation::Path)
                .required(true)
                .param_type("integer")
                .description("User id"),
            ParamDescriptor::new("page", ParamLocation::Query)
                .param_type("integer")
                .default_value(json!(1)),
        ];

        let built = make_parameters(&mut doc, &params, "/user/{id}").unwrap();
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!([
                {"in": "path", "name": "id", "description": "User id", "required": true, "type": "integer"},
                {"in": "query", "name": "page", "description": "", "required": false, "type": "integer", "default": 1},
            ])
        );
    }

    #[test]
    fn null_default_is_written() {
        let mut doc = DocumentStore::new();
        let cursor: ParamDescriptor =
            serde_yaml_ng::from_str("name: cursor\nin: query\ntype: string\ndefault: null\n")
                .unwrap();

        let built = make_parameters(&mut doc, &[cursor], "/feed").unwrap();
        assert_eq!(
            serde_json::to_value(&built[0]).unwrap(),
            json!({"in": "query", "name": "cursor", "description": "", "required": false, "type": "string", "default": null})
        );
    }

    #[test]
    fn placeholders_are_inserted_even_without_params() {
        let mut doc = DocumentStore::new();
        let built = make_parameters(&mut doc, &[], "/health").unwrap();
        assert!(built.is_empty());
        assert!(doc.definition("ModelArray").is_some());
        assert!(doc.definition("ModelObject").is_some());
    }

    #[test]
    fn body_parameter_references_path_model() {
        let mut doc = DocumentStore::new();
        let body = ParamDescriptor::new("body", ParamLocation::Body)
            .param_type("string")
            .rules([("name|Name", "required|string"), ("age|Age", "int")]);

        let built = make_parameters(&mut doc, &[body], "/user/{id}").unwrap();
        assert_eq!(built.len(), 1);
        assert!(built[0].param_type.is_none());
        assert_eq!(
            built[0].schema.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/UserId")
        );

        let model = doc.definition("UserId").unwrap();
        assert_eq!(
            model.property("age").unwrap().schema_type.as_deref(),
            Some("integer")
        );
        assert_eq!(
            model.property("name").unwrap().description.as_deref(),
            Some("Name")
        );
    }

    #[test]
    fn empty_rule_map_attaches_no_schema() {
        let mut doc = DocumentStore::new();
        let body = ParamDescriptor::from(apidog_core::BodyParamDescriptor {
            name: "body".to_string(),
            description: String::new(),
            required: true,
            rules: IndexMap::new(),
        });

        let built = make_parameters(&mut doc, &[body], "/user").unwrap();
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!([{"in": "body", "name": "body", "description": "", "required": true}])
        );
        assert!(doc.definition("User").is_none());
        let names: Vec<&String> = doc.definitions().keys().collect();
        assert_eq!(names, vec!["ModelArray", "ModelObject"]);
    }

    #[test]
    fn duplicate_names_collapse_in_first_position() {
        let mut doc = DocumentStore::new();
        let params = vec![
            ParamDescriptor::new("q", ParamLocation::Query).description("first"),
            ParamDescriptor::new("page", ParamLocation::Query),
            ParamDescriptor::new("q", ParamLocation::Header).description("second"),
        ];

        let built = make_parameters(&mut doc, &params, "/search").unwrap();
        let names: Vec<&str> = built.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["q", "page"]);
        assert_eq!(built[0].description, "second");
        assert_eq!(built[0].location, "header");
        assert_eq!(
            doc.collisions(),
            &[Collision::Parameter {
                path: "/search".to_string(),
                name: "q".to_string()
            }]
        );
    }

    #[test]
    fn deny_policy_rejects_duplicate_names() {
        let mut doc = DocumentStore::new().with_collision_policy(CollisionPolicy::Deny);
        let params = vec![
            ParamDescriptor::new("q", ParamLocation::Query),
            ParamDescriptor::new("q", ParamLocation::Path),
        ];

        let err = make_parameters(&mut doc, &params, "/search").unwrap_err();
        assert!(matches!(err, Error::ParameterCollision { .. }));
    }
}
