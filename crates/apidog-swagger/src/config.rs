//! Project-level generator configuration loaded from YAML or JSON.
//!
//! Externalizes the document skeleton (Swagger version, `info`, host, ...),
//! the output path and the collision policy so they live next to the
//! application instead of being hardcoded in Rust source.
//!
//! # File format
//!
//! ```yaml
//! # config/swagger.yaml
//! output_file: public/swagger.json
//!
//! # overwrite (default) | warn | deny
//! collisions: warn
//!
//! # Fields copied verbatim to the top of the generated document.
//! skeleton:
//!   swagger: "2.0"
//!   info:
//!     title: User API
//!     version: 1.0.0
//!   host: 127.0.0.1:9501
//!   schemes: [http]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

/// What happens when a registration overwrites different existing content.
///
/// Overwriting itself happens under every policy; the policy only decides
/// whether it is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Overwrite without a diagnostic.
    #[default]
    Overwrite,
    /// Overwrite and emit a `tracing` warning.
    Warn,
    /// Abort the registration with a collision error.
    Deny,
}

impl FromStr for CollisionPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "warn" => Ok(Self::Warn),
            "deny" => Ok(Self::Deny),
            other => Err(crate::Error::UnknownCollisionPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overwrite => "overwrite",
            Self::Warn => "warn",
            Self::Deny => "deny",
        })
    }
}

/// Project-level Swagger generation config.
///
/// Loaded from a file via [`ProjectConfig::load`], then turned into a
/// document via [`DocumentStore::from_config`](crate::DocumentStore::from_config).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Where [`DocumentStore::save`](crate::DocumentStore::save) writes the
    /// document. Saving is a no-op without it.
    pub output_file: Option<PathBuf>,

    /// Reporting policy for overwrite collisions.
    pub collisions: CollisionPolicy,

    /// Externally preset document fields.
    ///
    /// May also seed `tags`, `paths` and `definitions`. A legacy
    /// `output_file` key inside the skeleton is honored when the top-level
    /// key is absent.
    pub skeleton: Map<String, Value>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let mut skeleton = Map::new();
        skeleton.insert(
            "swagger".to_string(),
            Value::String(crate::SWAGGER_VERSION.to_string()),
        );
        Self {
            output_file: None,
            collisions: CollisionPolicy::default(),
            skeleton,
        }
    }
}

impl ProjectConfig {
    /// Load config from a YAML file, or a JSON file when the extension is `.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml_ng::from_str(&content)?
        };
        Ok(config)
    }

    /// Output path, falling back to a legacy `output_file` skeleton key.
    #[must_use]
    pub fn resolved_output_file(&self) -> Option<PathBuf> {
        self.output_file.clone().or_else(|| {
            self.skeleton
                .get("output_file")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        })
    }
}

/// Whether `path` has a `.json` extension.
pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
