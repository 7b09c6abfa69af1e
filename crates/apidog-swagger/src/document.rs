//! The in-memory Swagger document and its serialization.
//!
//! One [`DocumentStore`] is owned by one generation run. Builders receive it
//! by `&mut` reference and mutate it in place; nothing is global.
//!
//! Every setter overwrites. When the new content differs from what was
//! there, the overwrite is a [`Collision`]: it is recorded, and the
//! configured [`CollisionPolicy`] decides whether it is also logged or
//! turned into an error.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::{CollisionPolicy, ProjectConfig};
use crate::error::{self, Error};
use crate::model::{Operation, PathEntry, PathItem, Schema, Tag};

/// An overwrite that replaced different existing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collision {
    /// A definition name was reused for a different schema.
    Definition {
        /// Definition name.
        name: String,
    },
    /// Two parameters of one operation share a name.
    Parameter {
        /// Resolved operation path.
        path: String,
        /// Parameter name.
        name: String,
    },
    /// An operation key was rewritten with a different operation.
    Operation {
        /// Resolved operation path.
        path: String,
        /// Lower-case HTTP method.
        method: String,
    },
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Definition { name } => write!(f, "definition {name}"),
            Self::Parameter { path, name } => write!(f, "parameter {name} on {path}"),
            Self::Operation { path, method } => write!(f, "operation {method} {path}"),
        }
    }
}

impl From<Collision> for Error {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Definition { name } => Self::DefinitionCollision { name },
            Collision::Parameter { path, name } => Self::ParameterCollision { path, name },
            Collision::Operation { path, method } => Self::OperationCollision { path, method },
        }
    }
}

/// The growing Swagger document: skeleton fields, tags, paths, definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    /// Externally preset top-level fields (`swagger`, `info`, ...).
    skeleton: Map<String, Value>,
    /// Tags keyed by name, in first-insertion order.
    tags: IndexMap<String, Tag>,
    /// `path → method → operation`, plus seeded non-method keys.
    paths: IndexMap<String, PathItem>,
    /// Named schema definitions.
    definitions: IndexMap<String, Schema>,
    /// Output path for [`save`](Self::save). Never serialized.
    output_file: Option<PathBuf>,
    /// Reporting policy for collisions.
    policy: CollisionPolicy,
    /// Every collision seen so far.
    collisions: Vec<Collision>,
}

impl DocumentStore {
    /// Empty document with the default skeleton (`swagger: "2.0"`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            skeleton: ProjectConfig::default().skeleton,
            ..Self::default()
        }
    }

    /// Seed a document from project config.
    ///
    /// `tags` (a sequence of `{name, description}`), `paths` and
    /// `definitions` found in the skeleton seed the typed tables; every
    /// other skeleton key is kept verbatim. Seeded path items are stored
    /// as raw JSON and only replaced key by key when a route registers an
    /// operation at the same path and method.
    ///
    /// # Errors
    ///
    /// Returns an error if a seeded table does not have the expected shape.
    pub fn from_config(config: &ProjectConfig) -> error::Result<Self> {
        let mut skeleton = config.skeleton.clone();
        skeleton.remove("output_file");

        let mut doc = Self {
            output_file: config.resolved_output_file(),
            policy: config.collisions,
            ..Self::default()
        };

        if let Some(tags) = skeleton.remove("tags") {
            let tags: Vec<Tag> = serde_json::from_value(tags)?;
            for tag in tags {
                doc.tags.insert(tag.name.clone(), tag);
            }
        }
        if let Some(paths) = skeleton.remove("paths") {
            doc.paths = serde_json::from_value(paths)?;
        }
        if let Some(definitions) = skeleton.remove("definitions") {
            doc.definitions = serde_json::from_value(definitions)?;
        }
        doc.skeleton = skeleton;

        Ok(doc)
    }

    /// Set the output path used by [`save`](Self::save).
    #[must_use]
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Set the collision reporting policy.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Insert or overwrite a tag. Re-adding a tag keeps its position.
    pub fn add_tag(&mut self, name: &str, description: &str) {
        self.tags.insert(
            name.to_string(),
            Tag {
                name: name.to_string(),
                description: description.to_string(),
            },
        );
    }

    /// Insert or overwrite the operation at `path` + `method`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationCollision`] under [`CollisionPolicy::Deny`]
    /// when a different operation (generated or seeded) is already
    /// registered at this key.
    pub fn set_operation(
        &mut self,
        path: &str,
        method: &str,
        operation: Operation,
    ) -> error::Result<()> {
        let differs = match self.paths.get(path).and_then(|item| item.get(method)) {
            Some(PathEntry::Operation(existing)) => *existing != operation,
            Some(PathEntry::Seeded(existing)) => *existing != serde_json::to_value(&operation)?,
            None => false,
        };
        if differs {
            self.record_collision(Collision::Operation {
                path: path.to_string(),
                method: method.to_string(),
            })?;
        }
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(method.to_string(), PathEntry::Operation(operation));
        Ok(())
    }

    /// Insert or overwrite a named definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DefinitionCollision`] under [`CollisionPolicy::Deny`]
    /// when a different schema is already registered under `name`.
    pub fn set_definition(&mut self, name: &str, schema: Schema) -> error::Result<()> {
        if self
            .definitions
            .get(name)
            .is_some_and(|existing| *existing != schema)
        {
            self.record_collision(Collision::Definition {
                name: name.to_string(),
            })?;
        }
        self.definitions.insert(name.to_string(), schema);
        Ok(())
    }

    /// Record a collision and apply the policy.
    ///
    /// # Errors
    ///
    /// Returns the matching collision error under [`CollisionPolicy::Deny`].
    pub fn record_collision(&mut self, collision: Collision) -> error::Result<()> {
        self.collisions.push(collision.clone());
        match self.policy {
            CollisionPolicy::Overwrite => Ok(()),
            CollisionPolicy::Warn => {
                tracing::warn!(%collision, "overwriting existing entry");
                Ok(())
            }
            CollisionPolicy::Deny => Err(collision.into()),
        }
    }

    /// Set `info.version` in the skeleton, creating `info` if needed.
    pub fn set_version(&mut self, version: &str) {
        let info = self
            .skeleton
            .entry("info")
            .or_insert_with(|| Value::Object(Map::new()));
        if !info.is_object() {
            *info = Value::Object(Map::new());
        }
        if let Some(info) = info.as_object_mut() {
            info.insert("version".to_string(), Value::String(version.to_string()));
        }
    }

    /// Externally preset fields.
    #[must_use]
    pub fn skeleton(&self) -> &Map<String, Value> {
        &self.skeleton
    }

    /// Tags in first-insertion order.
    #[must_use]
    pub fn tags(&self) -> &IndexMap<String, Tag> {
        &self.tags
    }

    /// All registered paths.
    #[must_use]
    pub fn paths(&self) -> &IndexMap<String, PathItem> {
        &self.paths
    }

    /// Generated operation at `path` + `method`, if any.
    ///
    /// Seeded entries are not typed and are only reachable through
    /// [`paths`](Self::paths).
    #[must_use]
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.get(method)?.as_operation()
    }

    /// All registered definitions.
    #[must_use]
    pub fn definitions(&self) -> &IndexMap<String, Schema> {
        &self.definitions
    }

    /// Definition by name, if any.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }

    /// Collisions recorded so far, in order.
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Configured output path.
    #[must_use]
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    /// The document body to serialize.
    ///
    /// Skeleton fields come first, then `tags` as a sequence in
    /// first-insertion order, then `paths` and `definitions`. The output
    /// path is never part of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be converted to JSON.
    pub fn finalize(&self) -> error::Result<Value> {
        let mut body = self.skeleton.clone();
        let tags: Vec<&Tag> = self.tags.values().collect();
        body.insert("tags".to_string(), serde_json::to_value(tags)?);
        body.insert("paths".to_string(), serde_json::to_value(&self.paths)?);
        body.insert(
            "definitions".to_string(),
            serde_json::to_value(&self.definitions)?,
        );
        Ok(Value::Object(body))
    }

    /// Pretty-printed JSON text of [`finalize`](Self::finalize).
    ///
    /// Non-ASCII characters are written literally.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> error::Result<String> {
        let body = self.finalize()?;
        Ok(serde_json::to_string_pretty(&body)?)
    }

    /// Write the finalized document to the output path.
    ///
    /// Returns `Ok(false)` without touching the filesystem when no output
    /// path is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> error::Result<bool> {
        let Some(path) = self.output_file.as_deref() else {
            return Ok(false);
        };
        let text = self.to_json_string()?;
        std::fs::write(path, text)?;
        tracing::debug!(path = %path.display(), "swagger document written");
        Ok(true)
    }
}
