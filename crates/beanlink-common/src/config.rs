//! Linker configuration model.
//!
//! Configuration is optional: [`LinkerConfig::default`] carries the
//! well-known defaults, and the CLI may overlay a JSON or YAML file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{BeanlinkError, Result};

/// Read access to named system properties.
///
/// The linker queries this for the module-loader mode.
pub trait SystemProperties {
    /// Returns the value of the named property, if set.
    fn property(&self, name: &str) -> Option<&str>;
}

impl SystemProperties for BTreeMap<String, String> {
    fn property(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Root configuration for a linker instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Role link substituted for security-role references without one.
    pub default_security_role: String,
    /// Listener interface for message-driven beans without a messaging type.
    pub default_listener_interface: String,
    /// System properties visible to the linker.
    pub properties: BTreeMap<String, String>,
    /// Known container definitions, keyed by their id at lookup time.
    pub containers: Vec<ContainerDefinition>,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            default_security_role: constants::DEFAULT_SECURITY_ROLE.into(),
            default_listener_interface: constants::DEFAULT_LISTENER_INTERFACE.into(),
            properties: BTreeMap::new(),
            containers: ContainerDefinition::defaults(),
        }
    }
}

impl LinkerConfig {
    /// Loads a configuration file, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// valid configuration.
    pub fn from_path(path: &Path) -> Result<Self> {
        let value = crate::types::read_document(path)?;
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the container definition with the given id.
    #[must_use]
    pub fn container(&self, id: &str) -> Option<&ContainerDefinition> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Returns the configured module-loader mode.
    #[must_use]
    pub fn loader_mode(&self) -> Option<&str> {
        self.property(constants::LOADER_PROPERTY)
    }

    fn validate(&self) -> Result<()> {
        if self.default_security_role.trim().is_empty() {
            return Err(BeanlinkError::Config {
                message: "default_security_role must not be empty".into(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for container in &self.containers {
            if !seen.insert(container.id.as_str()) {
                return Err(BeanlinkError::Config {
                    message: format!("duplicate container id: \"{}\"", container.id),
                });
            }
        }
        Ok(())
    }
}

impl SystemProperties for LinkerConfig {
    fn property(&self, name: &str) -> Option<&str> {
        self.properties.property(name)
    }
}

/// Kind of container a definition describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    /// Entity beans with container-managed persistence.
    CmpEntity,
    /// Entity beans with bean-managed persistence.
    BmpEntity,
    /// Stateless session beans.
    Stateless,
    /// Stateful session beans.
    Stateful,
    /// Message-driven beans.
    Message,
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CmpEntity => write!(f, "CMP_ENTITY"),
            Self::BmpEntity => write!(f, "BMP_ENTITY"),
            Self::Stateless => write!(f, "STATELESS"),
            Self::Stateful => write!(f, "STATEFUL"),
            Self::Message => write!(f, "MESSAGE"),
        }
    }
}

/// A typed container definition.
///
/// Built fluently from one of the per-type constructors:
///
/// ```
/// use beanlink_common::config::ContainerDefinition;
///
/// let cmp = ContainerDefinition::cmp_entity()
///     .id("OrdersCmpContainer")
///     .cmp_engine_factory("com.example.CustomCmpEngineFactory");
/// assert_eq!(cmp.id, "OrdersCmpContainer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    /// Container id that bindings refer to.
    pub id: String,
    /// Kind of beans the container hosts.
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    /// Implementation class of the container.
    pub class_name: String,
    /// Constructor argument names, comma separated.
    pub constructor: String,
    /// Factory for the CMP engine, only meaningful for `CMP_ENTITY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmp_engine_factory: Option<String>,
}

impl ContainerDefinition {
    fn new(id: &str, container_type: ContainerType, class_name: &str, constructor: &str) -> Self {
        Self {
            id: id.into(),
            container_type,
            class_name: class_name.into(),
            constructor: constructor.into(),
            cmp_engine_factory: None,
        }
    }

    /// Container for entity beans with container-managed persistence.
    #[must_use]
    pub fn cmp_entity() -> Self {
        Self {
            cmp_engine_factory: Some(constants::DEFAULT_CMP_ENGINE_FACTORY.into()),
            ..Self::new(
                "CmpEntityContainer",
                ContainerType::CmpEntity,
                "org.apache.openejb.core.cmp.CmpContainer",
                "id, transactionManager, securityService, CmpEngineFactory",
            )
        }
    }

    /// Container for entity beans with bean-managed persistence.
    #[must_use]
    pub fn bmp_entity() -> Self {
        Self::new(
            "BmpEntityContainer",
            ContainerType::BmpEntity,
            "org.apache.openejb.core.entity.EntityContainer",
            "id, securityService, PoolSize",
        )
    }

    /// Container for stateless session beans.
    #[must_use]
    pub fn stateless() -> Self {
        Self::new(
            "StatelessContainer",
            ContainerType::Stateless,
            "org.apache.openejb.core.stateless.StatelessContainer",
            "id, securityService, TimeOut, PoolSize, StrictPooling",
        )
    }

    /// Container for stateful session beans.
    #[must_use]
    pub fn stateful() -> Self {
        Self::new(
            "StatefulContainer",
            ContainerType::Stateful,
            "org.apache.openejb.core.stateful.StatefulContainer",
            "id, securityService, Passivator, TimeOut, PoolSize, BulkPassivate",
        )
    }

    /// Container for message-driven beans.
    #[must_use]
    pub fn message() -> Self {
        Self::new(
            "MdbContainer",
            ContainerType::Message,
            "org.apache.openejb.core.mdb.MdbContainer",
            "id, securityService, ResourceAdapter, MessageListenerInterface, ActivationSpecClass, InstanceLimit",
        )
    }

    /// One default definition per container type.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::cmp_entity(),
            Self::bmp_entity(),
            Self::stateless(),
            Self::stateful(),
            Self::message(),
        ]
    }

    /// Sets the container id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the CMP engine factory.
    #[must_use]
    pub fn cmp_engine_factory(mut self, factory: impl Into<String>) -> Self {
        self.cmp_engine_factory = Some(factory.into());
        self
    }

    /// Returns the configurable properties of this definition.
    #[must_use]
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut props = BTreeMap::new();
        if let Some(factory) = &self.cmp_engine_factory {
            let _ = props.insert("CmpEngineFactory".to_string(), factory.clone());
        }
        props
    }
}
