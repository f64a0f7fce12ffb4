//! The binding tree: deployment-time identities for declared beans.

use std::collections::HashMap;

use beanlink_common::types::{ContainerId, DeploymentId};
use serde::{Deserialize, Serialize};

use crate::declaration::QueryMethod;

/// Root of a binding document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTree {
    /// One binding per declared bean.
    #[serde(default)]
    pub deployments: Vec<DeploymentBinding>,
}

impl BindingTree {
    /// Number of bindings in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    /// Returns `true` if the document binds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }

    /// Indexes the bindings by logical bean name.
    ///
    /// When a name is bound twice the later binding wins.
    #[must_use]
    pub fn deployments_by_name(&self) -> HashMap<&str, &DeploymentBinding> {
        self.deployments
            .iter()
            .map(|d| (d.ejb_name.as_str(), d))
            .collect()
    }
}

/// Deployment identity of one bean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentBinding {
    /// Logical name of the declared bean.
    pub ejb_name: String,
    /// Deployment id, unique within the module.
    pub deployment_id: DeploymentId,
    /// Container the bean is deployed into.
    pub container_id: ContainerId,
    /// Resource ids for the bean's resource references.
    #[serde(default)]
    pub resource_links: Vec<ResourceLink>,
    /// Query overrides for container-managed entities.
    #[serde(default)]
    pub queries: Vec<BindingQuery>,
}

impl DeploymentBinding {
    /// Creates a binding without resource links or queries.
    #[must_use]
    pub fn new(
        ejb_name: impl Into<String>,
        deployment_id: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        Self {
            ejb_name: ejb_name.into(),
            deployment_id: DeploymentId::new(deployment_id),
            container_id: ContainerId::new(container_id),
            resource_links: Vec::new(),
            queries: Vec::new(),
        }
    }

    /// Returns the resource link for the named resource reference.
    #[must_use]
    pub fn resource_link(&self, res_ref_name: &str) -> Option<&ResourceLink> {
        self.resource_links
            .iter()
            .find(|l| l.res_ref_name == res_ref_name)
    }
}

/// Maps a resource reference name to a concrete resource id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Resource reference name on the bean.
    pub res_ref_name: String,
    /// Target resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_id: Option<String>,
}

/// A deployment-supplied query in the persistence engine's own language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingQuery {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Method the query implements.
    pub query_method: QueryMethod,
    /// Query text, possibly with surrounding whitespace.
    pub object_ql: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_returns_every_binding() {
        let tree = BindingTree {
            deployments: vec![
                DeploymentBinding::new("A", "a-id", "C"),
                DeploymentBinding::new("B", "b-id", "C"),
            ],
        };
        let by_name = tree.deployments_by_name();
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name["B"].deployment_id.as_str(), "b-id");
    }

    #[test]
    fn resource_link_lookup_matches_reference_name() {
        let mut binding = DeploymentBinding::new("A", "a-id", "C");
        binding.resource_links.push(ResourceLink {
            res_ref_name: "jdbc/orders".into(),
            res_id: Some("OrdersDS".into()),
        });
        assert_eq!(
            binding
                .resource_link("jdbc/orders")
                .and_then(|l| l.res_id.as_deref()),
            Some("OrdersDS")
        );
        assert!(binding.resource_link("jdbc/other").is_none());
    }
}
