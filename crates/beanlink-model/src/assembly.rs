//! Assembly-level metadata: security roles, method permissions, container
//! transactions, and interceptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CallbackMethod, NamedMethod};

/// Module-wide assembly rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyDescriptor {
    /// Logical security roles.
    #[serde(default)]
    pub security_roles: Vec<SecurityRole>,
    /// Role grants on methods.
    #[serde(default)]
    pub method_permissions: Vec<MethodPermission>,
    /// Transaction attributes on methods.
    #[serde(default)]
    pub container_transactions: Vec<ContainerTransaction>,
    /// Bindings of interceptors to beans and methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interceptor_bindings: Option<Vec<InterceptorBinding>>,
}

/// A logical security role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRole {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Role name.
    pub role_name: String,
}

/// Grants roles access to a set of methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodPermission {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Roles granted access.
    #[serde(default)]
    pub role_names: Vec<String>,
    /// Whether the methods are callable without any role.
    #[serde(default)]
    pub unchecked: bool,
    /// Methods covered by the permission.
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// Assigns a transaction attribute to a set of methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTransaction {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attribute applied to the methods.
    pub trans_attribute: TransAttribute,
    /// Methods covered by the rule.
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// A method of a named bean, as referenced from assembly rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logical name of the bean declaring the method.
    pub ejb_name: String,
    /// Interface the method is exposed through; all when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_intf: Option<MethodIntf>,
    /// Method name, or `*` for every method.
    pub method_name: String,
    /// Parameter type names; every overload when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_params: Option<Vec<String>>,
}

impl Method {
    /// References every overload of `method_name` on `ejb_name`.
    #[must_use]
    pub fn new(ejb_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            ejb_name: ejb_name.into(),
            method_name: method_name.into(),
            ..Self::default()
        }
    }
}

/// Interface a method reference is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodIntf {
    /// Remote home interface.
    Home,
    /// Remote component or business interface.
    Remote,
    /// Local home interface.
    LocalHome,
    /// Local component or business interface.
    Local,
    /// Web service endpoint interface.
    ServiceEndpoint,
}

impl fmt::Display for MethodIntf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "Home",
            Self::Remote => "Remote",
            Self::LocalHome => "LocalHome",
            Self::Local => "Local",
            Self::ServiceEndpoint => "ServiceEndpoint",
        };
        f.write_str(name)
    }
}

/// Container transaction attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransAttribute {
    /// Run without a transaction.
    NotSupported,
    /// Join the caller's transaction if any.
    Supports,
    /// Join or start a transaction.
    Required,
    /// Always start a new transaction.
    RequiresNew,
    /// Require the caller's transaction.
    Mandatory,
    /// Refuse a caller transaction.
    Never,
}

impl fmt::Display for TransAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotSupported => "NotSupported",
            Self::Supports => "Supports",
            Self::Required => "Required",
            Self::RequiresNew => "RequiresNew",
            Self::Mandatory => "Mandatory",
            Self::Never => "Never",
        };
        f.write_str(name)
    }
}

/// An interceptor class and its callbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interceptor {
    /// Interceptor implementation class.
    pub interceptor_class: String,
    /// Around-invoke callbacks.
    #[serde(default)]
    pub around_invoke: Vec<CallbackMethod>,
    /// Post-construct callbacks.
    #[serde(default)]
    pub post_construct: Vec<CallbackMethod>,
    /// Pre-destroy callbacks.
    #[serde(default)]
    pub pre_destroy: Vec<CallbackMethod>,
    /// Post-activate callbacks.
    #[serde(default)]
    pub post_activate: Vec<CallbackMethod>,
    /// Pre-passivate callbacks.
    #[serde(default)]
    pub pre_passivate: Vec<CallbackMethod>,
}

/// Attaches interceptors to a bean, or to every bean with `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptorBinding {
    /// Logical bean name, or `*`.
    pub ejb_name: String,
    /// Interceptor classes, in binding order.
    #[serde(default)]
    pub interceptor_classes: Vec<String>,
    /// Explicit total ordering of interceptor classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interceptor_order: Option<Vec<String>>,
    /// Skip default interceptors for the target.
    #[serde(default)]
    pub exclude_default_interceptors: bool,
    /// Skip class-level interceptors for the target method.
    #[serde(default)]
    pub exclude_class_interceptors: bool,
    /// Target method; the whole bean when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<NamedMethod>,
}
