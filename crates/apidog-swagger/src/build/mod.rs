//! Route registration: one handler's metadata → one Swagger operation.
//!
//! Builders are grouped into modules:
//! - [`rules`] — rule strings → types, rule maps → body schemas
//! - [`params`] — parameter descriptors → parameter objects
//! - [`schema`] — example payloads → definition trees
//! - [`responses`] — response descriptors → response objects
//!
//! [`add_path`] drives them for a single route and writes the result into
//! the [`DocumentStore`]. Call it once per discovered route, then
//! [`DocumentStore::save`] once at the end of the run.

mod helpers;
pub(crate) mod params;
pub(crate) mod responses;
pub(crate) mod rules;
pub(crate) mod schema;

use apidog_core::{
    Annotation, ControllerMeta, MappingInfo, ParamDescriptor, ResponseDescriptor, RouteDescriptor,
};

use crate::document::DocumentStore;
use crate::error::{self, Error};
use crate::model::Operation;

pub use helpers::{clean_path, path_model_name};

/// Tag of the generator's own routes. Routes resolving to it are skipped.
pub const RESERVED_TAG: &str = "swagger";

/// A handler's annotation list, partitioned by kind.
#[derive(Debug, Default)]
pub struct RouteAnnotations {
    /// The last mapping seen, if any.
    pub mapping: Option<MappingInfo>,
    /// How many mapping items the list contained.
    pub mapping_count: usize,
    /// Parameters in declaration order (bodies included).
    pub params: Vec<ParamDescriptor>,
    /// Responses in declaration order.
    pub responses: Vec<ResponseDescriptor>,
}

impl RouteAnnotations {
    /// Split a flat list. Later mappings replace earlier ones.
    #[must_use]
    pub fn partition(annotations: &[Annotation]) -> Self {
        let mut parts = Self::default();
        for annotation in annotations {
            match annotation {
                Annotation::Mapping(mapping) => {
                    parts.mapping = Some(mapping.clone());
                    parts.mapping_count += 1;
                }
                Annotation::Param(param) => parts.params.push(param.clone()),
                Annotation::Body(body) => parts.params.push(body.clone().into()),
                Annotation::Response(response) => parts.responses.push(response.clone()),
            }
        }
        parts
    }
}

/// Resolve the tag: the explicit controller tag, else the type name.
#[must_use]
pub fn resolve_tag<'a>(route: &'a RouteDescriptor, controller: &'a ControllerMeta) -> &'a str {
    controller
        .tag
        .as_deref()
        .filter(|tag| !tag.is_empty())
        .unwrap_or(&route.type_name)
}

/// Join a mapping path to a prefix.
///
/// Empty → the prefix; relative → `prefix/path`; leading `/` → verbatim.
#[must_use]
pub fn resolve_path(prefix: &str, mapping_path: &str) -> String {
    if mapping_path.is_empty() {
        prefix.to_string()
    } else if mapping_path.starts_with('/') {
        mapping_path.to_string()
    } else {
        format!("{prefix}/{mapping_path}")
    }
}

/// Lower-cased first HTTP method of a mapping (`get` when none is declared).
///
/// A mapping declaring several methods is documented under the first one
/// only. It is unknown whether that single-entry policy is intended, so it
/// is kept and logged.
#[must_use]
pub fn resolve_method(mapping: &MappingInfo) -> String {
    if mapping.methods.len() > 1 {
        tracing::debug!(
            methods = ?mapping.methods,
            path = %mapping.path,
            "mapping declares several methods, documenting the first only"
        );
    }
    mapping
        .methods
        .first()
        .map_or_else(|| "get".to_string(), |m| m.to_lowercase())
}

/// Derive the default path prefix from a handler type name.
///
/// Lower-cases the name, turns namespace separators (`\` and `::`) into
/// `/`, then removes every `app/controller` and then every `controller`.
///
/// `App\Controller\UserController` → `/user`
#[must_use]
pub fn base_path(type_name: &str) -> String {
    type_name
        .to_lowercase()
        .replace('\\', "/")
        .replace("::", "/")
        .replace("app/controller", "")
        .replace("controller", "")
}

/// Register one route.
///
/// Returns `Ok(false)` without touching the document when the resolved tag
/// is [`RESERVED_TAG`]. Otherwise registers the tag, builds parameters and
/// responses, and writes the operation at its resolved path and method,
/// replacing anything already there.
///
/// # Errors
///
/// Returns [`Error::MissingMapping`] when the list has no mapping item, or
/// a collision error under [`CollisionPolicy::Deny`](crate::CollisionPolicy::Deny).
pub fn add_path(
    doc: &mut DocumentStore,
    route: &RouteDescriptor,
    controller: &ControllerMeta,
    annotations: &[Annotation],
) -> error::Result<bool> {
    let tag = resolve_tag(route, controller);
    if tag == RESERVED_TAG {
        tracing::debug!(route = %route.type_name, "skipping reserved swagger tag");
        return Ok(false);
    }

    let parts = RouteAnnotations::partition(annotations);
    let Some(mapping) = parts.mapping else {
        return Err(Error::MissingMapping {
            type_name: route.type_name.clone(),
            method_name: route.method_name.clone(),
        });
    };
    if parts.mapping_count > 1 {
        tracing::debug!(
            route = %route.type_name,
            method = %route.method_name,
            count = parts.mapping_count,
            "several mappings declared, keeping the last"
        );
    }

    doc.add_tag(tag, &controller.description);

    let path = resolve_path(&route.path_prefix, &mapping.path);
    let method = resolve_method(&mapping);

    let parameters = params::make_parameters(doc, &parts.params, &path)?;
    let responses = responses::make_responses(doc, &parts.responses, &path, &method)?;

    let operation = Operation {
        tags: vec![tag.to_string()],
        summary: mapping.summary,
        parameters,
        responses,
        description: mapping.description,
        ..Operation::default()
    };
    doc.set_operation(&path, &method, operation)?;

    tracing::debug!(%path, %method, %tag, "route registered");
    Ok(true)
}
