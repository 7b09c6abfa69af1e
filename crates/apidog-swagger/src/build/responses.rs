//! Response descriptors → Swagger response objects.

use apidog_core::ResponseDescriptor;
use indexmap::IndexMap;

use crate::document::DocumentStore;
use crate::error;
use crate::model::{Response, Schema};

use super::helpers::{clean_path, path_model_name, ucfirst};
use super::schema::infer_definition;

/// Definition name for an example payload.
///
/// `/user/{id}`, `get`, `200` → `UserIdGetResponse200`
#[must_use]
pub fn response_model_name(path: &str, method: &str, code: u16) -> String {
    format!(
        "{}{}Response{code}",
        path_model_name(&clean_path(path)),
        ucfirst(method)
    )
}

/// Build the responses map for one operation.
///
/// Non-empty example payloads are inferred into definitions and referenced
/// from the response; empty ones leave the response without a schema.
/// A repeated status code replaces the earlier entry.
///
/// # Errors
///
/// Fails only under [`CollisionPolicy::Deny`](crate::CollisionPolicy::Deny).
pub fn make_responses(
    doc: &mut DocumentStore,
    responses: &[ResponseDescriptor],
    path: &str,
    method: &str,
) -> error::Result<IndexMap<String, Response>> {
    let mut resp = IndexMap::new();
    for item in responses {
        let mut response = Response {
            description: item.description.clone(),
            ..Response::default()
        };

        if let Some(payload) = item.schema.as_ref().filter(|p| !p.is_empty()) {
            let model_name = response_model_name(path, method, item.code);
            if infer_definition(doc, payload, &model_name, 0)?.is_some() {
                response.schema = Some(Schema::reference_to(&model_name));
            }
        }

        resp.insert(item.code.to_string(), response);
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn model_name_combines_path_method_code() {
        assert_eq!(
            response_model_name("/user/{id}", "get", 200),
            "UserIdGetResponse200"
        );
        assert_eq!(
            response_model_name("/order/list", "post", 422),
            "OrderListPostResponse422"
        );
    }

    #[test]
    fn example_payload_becomes_reference() {
        let mut doc = DocumentStore::new();
        let responses = vec![
            ResponseDescriptor::new(200, "OK").example(json!({"id": 1, "name": "a"})),
            ResponseDescriptor::new(404, "Not found"),
        ];

        let built = make_responses(&mut doc, &responses, "/user/{id}", "get").unwrap();
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!({
                "200": {
                    "description": "OK",
                    "schema": {"$ref": "#/definitions/UserIdGetResponse200"}
                },
                "404": {"description": "Not found"}
            })
        );
        assert!(doc.definition("UserIdGetResponse200").is_some());
    }

    #[test]
    fn empty_payload_attaches_no_schema() {
        let mut doc = DocumentStore::new();
        let responses = vec![
            ResponseDescriptor::new(200, "OK").example(json!({})),
            ResponseDescriptor::new(201, "Created").example(json!("")),
        ];

        let built = make_responses(&mut doc, &responses, "/user", "post").unwrap();
        assert!(built["200"].schema.is_none());
        assert!(built["201"].schema.is_none());
        assert!(doc.definitions().is_empty());
    }

    #[test]
    fn responses_keep_declaration_order() {
        let mut doc = DocumentStore::new();
        let responses = vec![
            ResponseDescriptor::new(500, "Error"),
            ResponseDescriptor::new(200, "OK"),
        ];
        let built = make_responses(&mut doc, &responses, "/x", "get").unwrap();
        let codes: Vec<&String> = built.keys().collect();
        assert_eq!(codes, vec!["500", "200"]);
    }
}
