//! Domain primitive types used across the beanlink workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime identity a binding assigns to a bean. Unique within a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeploymentId(String);

impl DeploymentId {
    /// Creates a deployment ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeploymentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of the container a bean is deployed into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Encoding of a descriptor or configuration document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON document (`.json`).
    Json,
    /// YAML document (`.yaml` or `.yml`).
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or not recognized.
    pub fn from_path(path: &std::path::Path) -> crate::error::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            other => Err(crate::error::BeanlinkError::Config {
                message: format!(
                    "unsupported document extension {other:?} for {}; expected .json, .yaml or .yml",
                    path.display()
                ),
            }),
        }
    }

    /// Decodes `content` into an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid in this format.
    pub fn decode_value(self, content: &str) -> crate::error::Result<serde_json::Value> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Reads a JSON or YAML document from disk into an untyped value.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_document(path: &std::path::Path) -> crate::error::Result<serde_json::Value> {
    let format = DocumentFormat::from_path(path)?;
    let content =
        std::fs::read_to_string(path).map_err(|source| crate::error::BeanlinkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    format.decode_value(&content)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn deployment_id_displays_inner_value() {
        let id = DeploymentId::new("orders/OrderBean");
        assert_eq!(id.to_string(), "orders/OrderBean");
        assert_eq!(id.as_str(), "orders/OrderBean");
    }

    #[test]
    fn identifiers_serialize_as_plain_strings() {
        let json = serde_json::to_string(&ContainerId::from("Default Stateless Container"))
            .expect("serialize");
        assert_eq!(json, "\"Default Stateless Container\"");
    }

    #[test]
    fn format_is_picked_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/ejb-jar.json")).expect("json"),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("openejb-jar.yml")).expect("yml"),
            DocumentFormat::Yaml
        );
        assert!(DocumentFormat::from_path(Path::new("ejb-jar.xml")).is_err());
        assert!(DocumentFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn yaml_decodes_to_json_value() {
        let value = DocumentFormat::Yaml
            .decode_value("beans:\n  - name: A\n")
            .expect("decode");
        assert_eq!(value["beans"][0]["name"], "A");
    }
}
