//! Unified error types for the beanlink workspace.
//!
//! Every fatal resolution failure is a variant of [`BeanlinkError`]. The
//! rendered message is the localized, human-readable text handed back to the
//! caller; no partial plan accompanies it.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BeanlinkError {
    /// The declaration and binding documents disagree on the number of beans.
    #[error(
        "cannot link module {module}: it declares {declared} beans but its binding document deploys {deployed}"
    )]
    CountMismatch {
        /// Module path.
        module: String,
        /// Number of bean declarations.
        declared: usize,
        /// Number of deployment bindings.
        deployed: usize,
    },

    /// A declaration has no deployment binding with the same logical name.
    #[error("missing deployment binding for {ejb_name} in module {module}; redeploy required")]
    MissingBinding {
        /// Logical name of the unbound declaration.
        ejb_name: String,
        /// Module path.
        module: String,
    },

    /// Two beans of one module were bound to the same deployment id.
    #[error(
        "duplicate deployment id {deployment_id} within module {module}, second occurrence in bean {ejb_name}"
    )]
    DuplicateDeploymentId {
        /// The colliding deployment id.
        deployment_id: String,
        /// Module path.
        module: String,
        /// Bean carrying the second occurrence.
        ejb_name: String,
    },

    /// A method reference names a bean that has no deployment binding.
    #[error("method {method_name} references bean {ejb_name} which has no deployment in module {module}")]
    UnresolvedMethod {
        /// Logical bean name the method refers to.
        ejb_name: String,
        /// Referenced method name.
        method_name: String,
        /// Module path.
        module: String,
    },

    /// A relationship role names a bean that does not exist.
    #[error("relation role source bean {ejb_name} not found in module {module}")]
    RoleSourceNotFound {
        /// Logical bean name of the role source.
        ejb_name: String,
        /// Module path.
        module: String,
    },

    /// A relationship role names a bean that is not an entity.
    #[error("relation role source bean {ejb_name} in module {module} is not an entity bean")]
    RoleSourceNotEntity {
        /// Logical bean name of the role source.
        ejb_name: String,
        /// Module path.
        module: String,
    },

    /// A relationship does not declare exactly two roles.
    #[error("relationship {relation} in module {module} declares {roles} roles, expected exactly 2")]
    MalformedRelationship {
        /// Relationship name, or its position when unnamed.
        relation: String,
        /// Number of roles actually declared.
        roles: usize,
        /// Module path.
        module: String,
    },

    /// A declaration carries a kind discriminator outside the known set.
    #[error("unknown bean kind \"{kind}\" for bean {ejb_name}")]
    UnknownKind {
        /// Logical bean name.
        ejb_name: String,
        /// The unrecognized discriminator.
        kind: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value or document is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

impl BeanlinkError {
    /// Returns `true` for internal or model errors, as opposed to
    /// disagreements between the two user-authored documents.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::UnknownKind { .. } | Self::UnresolvedMethod { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BeanlinkError>;
