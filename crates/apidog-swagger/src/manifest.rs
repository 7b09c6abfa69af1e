//! Route manifests: collector output the CLI feeds into [`add_path`].
//!
//! A manifest lists controllers and, per controller, the handler methods
//! with their flat annotation lists:
//!
//! ```yaml
//! controllers:
//!   - class: App\Controller\UserController
//!     tag: User
//!     description: User management
//!     # prefix: /user       (derived from the class name when absent)
//!     routes:
//!       - method: info
//!         annotations:
//!           - mapping: { path: "{id}", methods: [GET], summary: Fetch user }
//!           - param: { in: path, name: id, required: true, type: integer }
//!           - response: { code: 200, description: OK, schema: { id: 1 } }
//! ```
//!
//! Entries are applied in file order, so later routes win on overwrite.

use std::path::Path;

use apidog_core::{Annotation, ControllerMeta, RouteDescriptor};
use serde::Deserialize;

use crate::build::{add_path, base_path};
use crate::document::DocumentStore;
use crate::error;

/// Every controller a collector discovered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Controllers in discovery order.
    pub controllers: Vec<ControllerEntry>,
}

/// One controller and its handler methods.
#[derive(Debug, Clone, Deserialize)]
pub struct ControllerEntry {
    /// Fully qualified type name.
    #[serde(rename = "class", alias = "type_name")]
    pub type_name: String,
    /// Explicit tag.
    #[serde(default)]
    pub tag: Option<String>,
    /// Tag description.
    #[serde(default)]
    pub description: String,
    /// Path prefix. Derived via [`base_path`] when absent.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Handler methods.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One handler method and its annotations.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    /// Handler method name.
    pub method: String,
    /// Flat annotation list.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// What applying a manifest did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Routes written into the document.
    pub registered: usize,
    /// Routes skipped for the reserved tag.
    pub skipped: usize,
}

impl ControllerEntry {
    /// Class-level metadata.
    #[must_use]
    pub fn meta(&self) -> ControllerMeta {
        ControllerMeta {
            tag: self.tag.clone(),
            description: self.description.clone(),
        }
    }

    /// Effective path prefix.
    #[must_use]
    pub fn path_prefix(&self) -> String {
        self.prefix
            .clone()
            .unwrap_or_else(|| base_path(&self.type_name))
    }

    /// Descriptor for one of this controller's handlers.
    #[must_use]
    pub fn route(&self, method_name: &str) -> RouteDescriptor {
        RouteDescriptor {
            type_name: self.type_name.clone(),
            method_name: method_name.to_string(),
            path_prefix: self.path_prefix(),
        }
    }
}

impl Manifest {
    /// Load a manifest from a YAML file, or a JSON file when the extension
    /// is `.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if crate::config::is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse a YAML manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_yaml_str(yaml: &str) -> error::Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_json_str(json: &str) -> error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of routes across all controllers.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.controllers.iter().map(|c| c.routes.len()).sum()
    }

    /// Register every route into `doc`, in manifest order.
    ///
    /// # Errors
    ///
    /// Stops at the first route that fails (missing mapping, or a collision
    /// under a deny policy).
    pub fn apply(&self, doc: &mut DocumentStore) -> error::Result<ApplySummary> {
        let mut summary = ApplySummary::default();
        for controller in &self.controllers {
            let meta = controller.meta();
            for route in &controller.routes {
                let descriptor = controller.route(&route.method);
                if add_path(doc, &descriptor, &meta, &route.annotations)? {
                    summary.registered += 1;
                } else {
                    summary.skipped += 1;
                }
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    const MANIFEST: &str = indoc! {r#"
        controllers:
          - class: App\Controller\UserController
            tag: User
            description: User management
            routes:
              - method: info
                annotations:
                  - mapping: { path: "{id}", methods: [GET], summary: Fetch user }
                  - param: { in: path, name: id, required: true, type: integer }
              - method: create
                annotations:
                  - mapping: { path: "", methods: [POST] }
                  - body:
                      rules:
                        "name|Name": required|string
          - class: App\Controller\SwaggerController
            tag: swagger
            routes:
              - method: index
                annotations:
                  - mapping: { path: "", methods: [GET] }
    "#};

    #[test]
    fn parse_and_count() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(manifest.controllers.len(), 2);
        assert_eq!(manifest.route_count(), 3);
        assert_eq!(manifest.controllers[0].path_prefix(), "/user");
    }

    #[test]
    fn explicit_prefix_wins() {
        let manifest = Manifest::from_yaml_str(indoc! {r"
            controllers:
              - class: App\Controller\UserController
                prefix: /v1/users
        "})
        .unwrap();
        let route = manifest.controllers[0].route("list");
        assert_eq!(route.path_prefix, "/v1/users");
        assert_eq!(route.method_name, "list");
    }

    #[test]
    fn apply_registers_and_skips() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        let mut doc = DocumentStore::new();

        let summary = manifest.apply(&mut doc).unwrap();
        assert_eq!(
            summary,
            ApplySummary {
                registered: 2,
                skipped: 1
            }
        );
        assert!(doc.operation("/user/{id}", "get").is_some());
        assert!(doc.operation("/user", "post").is_some());
        assert!(doc.definition("User").is_some());
        assert!(!doc.tags().contains_key("swagger"));
    }

    #[test]
    fn json_manifest() {
        let manifest = Manifest::from_json_str(
            r#"{"controllers": [{"class": "Demo", "prefix": "/demo", "routes": [
                {"method": "ping", "annotations": [{"mapping": {"path": "ping"}}]}
            ]}]}"#,
        )
        .unwrap();
        let mut doc = DocumentStore::new();
        manifest.apply(&mut doc).unwrap();
        assert!(doc.operation("/demo/ping", "get").is_some());
        assert_eq!(doc.tags()["Demo"].description, "");
    }
}
