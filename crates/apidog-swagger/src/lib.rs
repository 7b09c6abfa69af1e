#![allow(clippy::doc_markdown)] // README uses "OpenAPI" proper noun throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod build;
mod config;
mod document;
mod error;
mod manifest;
pub mod model;

/// Swagger version written into the default skeleton.
pub const SWAGGER_VERSION: &str = "2.0";

pub use apidog_core::{
    Annotation, BodyParamDescriptor, ControllerMeta, ExampleValue, MappingInfo, ParamDescriptor,
    ParamLocation, ResponseDescriptor, RouteDescriptor, Rule,
};
pub use build::params::make_parameters;
pub use build::responses::{make_responses, response_model_name};
pub use build::rules::{
    init_models, placeholder_models, rule_type, rules_to_schema, RuleType, MODEL_ARRAY,
    MODEL_OBJECT,
};
pub use build::schema::infer_definition;
pub use build::{
    add_path, base_path, clean_path, path_model_name, resolve_method, resolve_path, resolve_tag,
    RouteAnnotations, RESERVED_TAG,
};
pub use config::{CollisionPolicy, ProjectConfig};
pub use document::{Collision, DocumentStore};
pub use error::{Error, Result};
pub use manifest::{ApplySummary, ControllerEntry, Manifest, RouteEntry};
