//! The declaration tree: beans as authored, before any deployment identity
//! is known.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assembly::{AssemblyDescriptor, Interceptor};
use crate::jndi::{JndiConsumer, SecurityRoleRef};
use crate::relationship::Relationship;
use crate::{CallbackMethod, NamedMethod};

/// Root of a declaration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationTree {
    /// Declared beans, in document order. Names are unique within a module.
    #[serde(default)]
    pub beans: Vec<EnterpriseBean>,
    /// Interceptor classes declared by the module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interceptors: Option<Vec<Interceptor>>,
    /// Assembly-level metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<AssemblyDescriptor>,
    /// Container-managed relationships between entity beans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,
}

impl DeclarationTree {
    /// Returns the declared bean with the given logical name.
    #[must_use]
    pub fn bean(&self, ejb_name: &str) -> Option<&EnterpriseBean> {
        self.beans.iter().find(|b| b.name() == ejb_name)
    }
}

/// The closed set of bean kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Stateless session bean.
    Stateless,
    /// Stateful session bean.
    Stateful,
    /// Entity bean.
    Entity,
    /// Message-driven bean.
    MessageDriven,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Stateless,
        Self::Stateful,
        Self::Entity,
        Self::MessageDriven,
    ];

    /// The discriminator used in declaration documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stateless => "stateless",
            Self::Stateful => "stateful",
            Self::Entity => "entity",
            Self::MessageDriven => "message-driven",
        }
    }

    /// Parses a document discriminator.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared bean, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EnterpriseBean {
    /// Stateless session bean.
    Stateless(SessionBean),
    /// Stateful session bean.
    Stateful(SessionBean),
    /// Entity bean.
    Entity(EntityBean),
    /// Message-driven bean.
    MessageDriven(MessageDrivenBean),
}

impl EnterpriseBean {
    /// Metadata shared by every kind.
    #[must_use]
    pub const fn common(&self) -> &BeanCommon {
        match self {
            Self::Stateless(s) | Self::Stateful(s) => &s.common,
            Self::Entity(e) => &e.common,
            Self::MessageDriven(m) => &m.common,
        }
    }

    /// Logical bean name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.common().ejb_name
    }

    /// Kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Stateless(_) => ComponentKind::Stateless,
            Self::Stateful(_) => ComponentKind::Stateful,
            Self::Entity(_) => ComponentKind::Entity,
            Self::MessageDriven(_) => ComponentKind::MessageDriven,
        }
    }

    /// Security-role references, for kinds reachable by remote clients.
    ///
    /// Message-driven beans have no client view and return `None`.
    #[must_use]
    pub fn security_role_refs(&self) -> Option<&[SecurityRoleRef]> {
        match self {
            Self::Stateless(s) | Self::Stateful(s) => Some(&s.security_role_refs),
            Self::Entity(e) => Some(&e.security_role_refs),
            Self::MessageDriven(_) => None,
        }
    }
}

/// Metadata every bean kind carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanCommon {
    /// Logical bean name.
    pub ejb_name: String,
    /// Implementation class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ejb_class: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display name for tooling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Icons for tooling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Around-invoke callbacks.
    #[serde(default)]
    pub around_invoke: Vec<CallbackMethod>,
    /// Post-construct callbacks.
    #[serde(default)]
    pub post_construct: Vec<CallbackMethod>,
    /// Pre-destroy callbacks.
    #[serde(default)]
    pub pre_destroy: Vec<CallbackMethod>,
    /// Timer timeout method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_method: Option<NamedMethod>,
    /// Security identity the bean runs under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_identity: Option<SecurityIdentity>,
    /// Transaction demarcation; container-managed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// Naming environment references.
    #[serde(default)]
    pub environment: JndiConsumer,
}

impl BeanCommon {
    /// Creates metadata for a bean with only its name set.
    #[must_use]
    pub fn named(ejb_name: impl Into<String>) -> Self {
        Self {
            ejb_name: ejb_name.into(),
            ..Self::default()
        }
    }
}

/// Small and large tooling icons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Small icon resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_icon: Option<String>,
    /// Large icon resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
}

/// The identity a bean executes its methods under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityIdentity {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Role to run as, if not the caller's identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as: Option<String>,
    /// Whether the caller's identity is propagated.
    #[serde(default)]
    pub use_caller_identity: bool,
}

/// Who demarcates transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Bean-managed transactions.
    Bean,
    /// Container-managed transactions.
    Container,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bean => write!(f, "Bean"),
            Self::Container => write!(f, "Container"),
        }
    }
}

/// Client-view interface names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanInterfaces {
    /// Remote home interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    /// Remote component interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Local home interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_home: Option<String>,
    /// Local component interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    /// Local business interfaces (session beans only).
    #[serde(default)]
    pub business_local: Vec<String>,
    /// Remote business interfaces (session beans only).
    #[serde(default)]
    pub business_remote: Vec<String>,
}

/// A stateless or stateful session bean.
///
/// The activation, init and remove members are only read for stateful beans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBean {
    /// Shared metadata.
    #[serde(flatten)]
    pub common: BeanCommon,
    /// Client-view interfaces.
    #[serde(default)]
    pub interfaces: BeanInterfaces,
    /// Security-role references made by the bean code.
    #[serde(default)]
    pub security_role_refs: Vec<SecurityRoleRef>,
    /// Post-activate callbacks.
    #[serde(default)]
    pub post_activate: Vec<CallbackMethod>,
    /// Pre-passivate callbacks.
    #[serde(default)]
    pub pre_passivate: Vec<CallbackMethod>,
    /// Init methods paired with home create methods.
    #[serde(default)]
    pub init_methods: Vec<InitMethod>,
    /// Remove methods.
    #[serde(default)]
    pub remove_methods: Vec<RemoveMethod>,
}

/// A bean method run in place of a home `create` method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitMethod {
    /// The home interface create method.
    pub create_method: NamedMethod,
    /// The bean-side init method.
    pub bean_method: NamedMethod,
}

/// A bean method that removes the stateful instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveMethod {
    /// The bean-side remove method.
    pub bean_method: NamedMethod,
    /// Keep the instance if the method throws.
    #[serde(default)]
    pub retain_if_exception: bool,
}

/// Who persists an entity bean's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceType {
    /// Bean-managed persistence.
    Bean,
    /// Container-managed persistence.
    #[default]
    Container,
}

impl fmt::Display for PersistenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bean => write!(f, "Bean"),
            Self::Container => write!(f, "Container"),
        }
    }
}

/// Container-managed persistence contract version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpVersion {
    /// CMP 1.x.
    #[serde(rename = "1.x")]
    Cmp1,
    /// CMP 2.x.
    #[serde(rename = "2.x")]
    Cmp2,
}

/// An entity bean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBean {
    /// Shared metadata.
    #[serde(flatten)]
    pub common: BeanCommon,
    /// Client-view interfaces; business interfaces are ignored.
    #[serde(default)]
    pub interfaces: BeanInterfaces,
    /// Security-role references made by the bean code.
    #[serde(default)]
    pub security_role_refs: Vec<SecurityRoleRef>,
    /// Schema name used by queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_schema_name: Option<String>,
    /// Primary key class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prim_key_class: Option<String>,
    /// Field holding a simple primary key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primkey_field: Option<String>,
    /// Persistence management style.
    #[serde(default)]
    pub persistence_type: PersistenceType,
    /// Whether the bean accepts loopback calls.
    #[serde(default)]
    pub reentrant: bool,
    /// CMP contract version, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmp_version: Option<CmpVersion>,
    /// Container-managed field names.
    #[serde(default)]
    pub cmp_fields: Vec<String>,
    /// Finder and select queries.
    #[serde(default)]
    pub queries: Vec<Query>,
}

/// The finder or select method a query implements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMethod {
    /// Method name.
    pub method_name: String,
    /// Parameter type names.
    #[serde(default)]
    pub method_params: Vec<String>,
}

impl QueryMethod {
    /// Creates a query method signature.
    #[must_use]
    pub fn new<I, S>(method_name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method_name: method_name.into(),
            method_params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// A declarative query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Method the query implements.
    pub query_method: QueryMethod,
    /// Query text, possibly with surrounding whitespace.
    pub ejb_ql: String,
}

/// A message-driven bean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDrivenBean {
    /// Shared metadata.
    #[serde(flatten)]
    pub common: BeanCommon,
    /// Message listener interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_type: Option<String>,
    /// Expected destination type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_destination_type: Option<String>,
    /// Activation configuration, in declaration order.
    #[serde(default)]
    pub activation_config: Vec<ActivationConfigProperty>,
}

/// One activation configuration name/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationConfigProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
}
