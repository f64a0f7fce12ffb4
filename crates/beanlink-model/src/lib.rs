//! # beanlink-model
//!
//! Typed trees for the two independently authored halves of a component
//! module:
//! - **Declarations** ([`declaration::DeclarationTree`]): beans, their
//!   interfaces and callbacks, assembly rules, interceptors, relationships.
//! - **Bindings** ([`binding::BindingTree`]): deployment ids, container ids,
//!   resource links and query overrides assigned to those beans.
//!
//! Both trees are read-only inputs to `beanlink-linker`. The [`load`]
//! module materializes them from JSON or YAML documents.

pub mod assembly;
pub mod binding;
pub mod declaration;
pub mod jndi;
pub mod load;
pub mod relationship;

use serde::{Deserialize, Serialize};

/// A method identified by name and optional parameter types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMethod {
    /// Method name.
    pub method_name: String,
    /// Parameter type names; `None` matches every overload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_params: Option<Vec<String>>,
}

impl NamedMethod {
    /// Creates a method reference matching every overload of `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            method_name: name.into(),
            method_params: None,
        }
    }

    /// Restricts the reference to the given parameter types.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.method_params = Some(params.into_iter().map(Into::into).collect());
        self
    }
}

/// A lifecycle or interception callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackMethod {
    /// Declaring class; `None` means the bean or interceptor class itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Callback method name.
    pub method_name: String,
}

impl CallbackMethod {
    /// Creates a callback declared on the bean class itself.
    #[must_use]
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            class_name: None,
            method_name: method_name.into(),
        }
    }
}
