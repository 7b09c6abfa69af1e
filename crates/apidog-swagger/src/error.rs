//! Typed error enum for the `apidog-swagger` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.
//!
//! Collision variants are only produced under
//! [`CollisionPolicy::Deny`](crate::CollisionPolicy::Deny); the default
//! policy overwrites silently.

/// Errors produced by `apidog-swagger` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading config or manifest, writing the document).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A handler's annotation list has no mapping item.
    #[error("route {type_name}::{method_name} has no mapping annotation")]
    MissingMapping {
        /// Handler type name.
        type_name: String,
        /// Handler method name.
        method_name: String,
    },

    /// A definition name was re-registered with a different schema.
    #[error("definition '{name}' registered twice with different schemas")]
    DefinitionCollision {
        /// The colliding definition name.
        name: String,
    },

    /// Two parameters of one operation share a name.
    #[error("parameter '{name}' declared twice on {path}")]
    ParameterCollision {
        /// Resolved operation path.
        path: String,
        /// The colliding parameter name.
        name: String,
    },

    /// An operation key was rewritten with a different operation.
    #[error("operation {method} {path} registered twice with different content")]
    OperationCollision {
        /// Resolved operation path.
        path: String,
        /// Lower-case HTTP method.
        method: String,
    },

    /// Unknown collision policy name.
    #[error("unknown collision policy '{0}'; expected overwrite, warn or deny")]
    UnknownCollisionPolicy(String),
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
