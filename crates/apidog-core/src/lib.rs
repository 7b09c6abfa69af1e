//! Shared descriptor records for the apidog ecosystem.
//!
//! Route discovery (reading controller annotations, router tables, or any
//! other source of handler metadata) happens outside this workspace. The
//! collaborator doing it hands over plain records defined here:
//!
//! - [`RouteDescriptor`] identifies one handler and its path prefix.
//! - [`ControllerMeta`] carries the class-level tag and description.
//! - [`Annotation`] is one item of a handler's flat metadata list: a
//!   [`MappingInfo`], a [`ParamDescriptor`], a [`BodyParamDescriptor`] or a
//!   [`ResponseDescriptor`].
//! - [`ExampleValue`] is the closed value union used for example payloads.
//!
//! `apidog-swagger` consumes these records to build the Swagger document.
//! You should not need to depend on this crate directly unless you are
//! writing a route collector.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod descriptor;
pub mod example;

pub use descriptor::{
    Annotation, BodyParamDescriptor, ControllerMeta, MappingInfo, ParamDescriptor, ParamLocation,
    ResponseDescriptor, RouteDescriptor, Rule,
};
pub use example::ExampleValue;
