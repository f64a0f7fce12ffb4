//! Naming environment references declared by a bean.

use serde::{Deserialize, Serialize};

/// All naming environment references of one bean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JndiConsumer {
    /// Simple environment entries.
    #[serde(default)]
    pub env_entries: Vec<EnvEntry>,
    /// References to remote bean views.
    #[serde(default)]
    pub ejb_refs: Vec<EjbRef>,
    /// References to local bean views.
    #[serde(default)]
    pub ejb_local_refs: Vec<EjbRef>,
    /// Resource manager connection factory references.
    #[serde(default)]
    pub resource_refs: Vec<ResourceRef>,
    /// Administered object references.
    #[serde(default)]
    pub resource_env_refs: Vec<ResourceEnvRef>,
}

/// A simple typed environment value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvEntry {
    /// Entry name relative to `java:comp/env`.
    pub name: String,
    /// Value type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_type: Option<String>,
    /// Value, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Kind of bean an EJB reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EjbRefType {
    /// Session bean.
    Session,
    /// Entity bean.
    Entity,
}

/// A reference to another bean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EjbRef {
    /// Reference name relative to `java:comp/env`.
    pub name: String,
    /// Kind of the target bean.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<EjbRefType>,
    /// Home interface of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    /// Component or business interface of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Target bean name, optionally prefixed by `module-path#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ejb_link: Option<String>,
}

/// Whether the bean or the container signs on to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResAuth {
    /// The bean code signs on.
    Application,
    /// The container signs on.
    Container,
}

/// A reference to a resource manager connection factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Reference name relative to `java:comp/env`.
    pub res_ref_name: String,
    /// Connection factory type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_type: Option<String>,
    /// Sign-on responsibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_auth: Option<ResAuth>,
    /// Resource id the reference is linked to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_link: Option<String>,
}

impl ResourceRef {
    /// Creates an unlinked reference.
    #[must_use]
    pub fn new(res_ref_name: impl Into<String>) -> Self {
        Self {
            res_ref_name: res_ref_name.into(),
            ..Self::default()
        }
    }
}

/// A reference to an administered object such as a queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEnvRef {
    /// Reference name relative to `java:comp/env`.
    pub name: String,
    /// Object type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_type: Option<String>,
    /// Resource id the reference is linked to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A role name used in bean code, optionally linked to a logical role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRoleRef {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Role name as used in code.
    pub role_name: String,
    /// Logical security role it maps to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_link: Option<String>,
}
