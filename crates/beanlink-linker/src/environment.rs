//! Naming environment resolution.
//!
//! The linker rewrites resource links from the binding document and then
//! asks an [`EnvironmentBuilder`] for each bean's final environment. The
//! builder sees every resolved component so that EJB links can be turned
//! into deployment ids.

use beanlink_common::error::Result;
use beanlink_common::types::DeploymentId;
use beanlink_model::binding::DeploymentBinding;
use beanlink_model::jndi::{EjbRef, JndiConsumer, ResAuth};
use serde::Serialize;

use crate::plan::ResolvedComponent;

/// The resolved naming environment of one bean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JndiEnvironment {
    /// Simple environment entries.
    pub env_entries: Vec<EnvEntryInfo>,
    /// Remote bean references.
    pub ejb_references: Vec<EjbReferenceInfo>,
    /// Local bean references.
    pub ejb_local_references: Vec<EjbReferenceInfo>,
    /// Resource references.
    pub resource_refs: Vec<ResourceReferenceInfo>,
    /// Resource environment references.
    pub resource_env_refs: Vec<ResourceEnvReferenceInfo>,
}

/// A simple environment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvEntryInfo {
    /// Entry name.
    pub name: String,
    /// Value type.
    pub env_type: Option<String>,
    /// Value.
    pub value: Option<String>,
}

/// A bean reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EjbReferenceInfo {
    /// Reference name.
    pub ref_name: String,
    /// Home interface.
    pub home: Option<String>,
    /// Component or business interface.
    pub interface: Option<String>,
    /// Declared link.
    pub link: Option<String>,
    /// Deployment id of the linked bean, when it lives in this module.
    pub deployment_id: Option<DeploymentId>,
}

/// A resource reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReferenceInfo {
    /// Reference name.
    pub ref_name: String,
    /// Connection factory type.
    pub ref_type: Option<String>,
    /// `Application` or `Container`.
    pub ref_auth: Option<String>,
    /// Resource id the reference is linked to.
    pub resource_id: Option<String>,
}

/// A resource environment reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEnvReferenceInfo {
    /// Reference name.
    pub ref_name: String,
    /// Object type.
    pub ref_type: Option<String>,
    /// Resource id the reference is linked to.
    pub resource_id: Option<String>,
}

/// Builds a bean's resolved naming environment.
pub trait EnvironmentBuilder {
    /// Builds the environment of `ejb_name` from its (link-rewritten)
    /// references, with the whole module's components in view.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be resolved.
    fn build(
        &self,
        components: &[ResolvedComponent],
        consumer: &JndiConsumer,
        ejb_name: &str,
    ) -> Result<JndiEnvironment>;
}

/// Applies a binding's resource links to a bean's references.
///
/// A reference is rewritten only when the binding has a link with the same
/// name carrying a non-empty resource id.
#[must_use]
pub fn link_resource_refs(consumer: &JndiConsumer, binding: &DeploymentBinding) -> JndiConsumer {
    let mut linked = consumer.clone();
    for res in &mut linked.resource_refs {
        let res_id = binding
            .resource_link(&res.res_ref_name)
            .and_then(|l| l.res_id.as_deref())
            .filter(|id| !id.is_empty());
        if let Some(res_id) = res_id {
            res.res_link = Some(res_id.to_string());
        }
    }
    linked
}

/// Projects references one-to-one and resolves EJB links within the module.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEnvironmentBuilder;

impl DefaultEnvironmentBuilder {
    fn ejb_reference(
        components: &[ResolvedComponent],
        reference: &EjbRef,
        ejb_name: &str,
    ) -> EjbReferenceInfo {
        let deployment_id = reference.ejb_link.as_deref().and_then(|link| {
            let target = link.rsplit_once('#').map_or(link, |(_, name)| name);
            let found = components.iter().find(|c| c.ejb_name == target);
            if found.is_none() {
                tracing::warn!(
                    bean = ejb_name,
                    reference = %reference.name,
                    link,
                    "ejb link does not name a bean in this module"
                );
            }
            found.map(|c| c.deployment_id.clone())
        });

        EjbReferenceInfo {
            ref_name: reference.name.clone(),
            home: reference.home.clone(),
            interface: reference.interface.clone(),
            link: reference.ejb_link.clone(),
            deployment_id,
        }
    }
}

impl EnvironmentBuilder for DefaultEnvironmentBuilder {
    fn build(
        &self,
        components: &[ResolvedComponent],
        consumer: &JndiConsumer,
        ejb_name: &str,
    ) -> Result<JndiEnvironment> {
        let ejb_refs = |refs: &[EjbRef]| -> Vec<EjbReferenceInfo> {
            refs.iter()
                .map(|r| Self::ejb_reference(components, r, ejb_name))
                .collect()
        };

        Ok(JndiEnvironment {
            env_entries: consumer
                .env_entries
                .iter()
                .map(|e| EnvEntryInfo {
                    name: e.name.clone(),
                    env_type: e.env_type.clone(),
                    value: e.value.clone(),
                })
                .collect(),
            ejb_references: ejb_refs(&consumer.ejb_refs),
            ejb_local_references: ejb_refs(&consumer.ejb_local_refs),
            resource_refs: consumer
                .resource_refs
                .iter()
                .map(|r| ResourceReferenceInfo {
                    ref_name: r.res_ref_name.clone(),
                    ref_type: r.res_type.clone(),
                    ref_auth: r.res_auth.map(|a| match a {
                        ResAuth::Application => "Application".to_string(),
                        ResAuth::Container => "Container".to_string(),
                    }),
                    resource_id: r.res_link.clone(),
                })
                .collect(),
            resource_env_refs: consumer
                .resource_env_refs
                .iter()
                .map(|r| ResourceEnvReferenceInfo {
                    ref_name: r.name.clone(),
                    ref_type: r.env_type.clone(),
                    resource_id: r.link.clone(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use beanlink_model::binding::ResourceLink;
    use beanlink_model::jndi::ResourceRef;

    use super::*;

    fn binding_with_links(links: Vec<ResourceLink>) -> DeploymentBinding {
        let mut binding = DeploymentBinding::new("OrderBean", "order-id", "StatelessContainer");
        binding.resource_links = links;
        binding
    }

    #[test]
    fn link_rewrites_matching_reference() {
        let consumer = JndiConsumer {
            resource_refs: vec![ResourceRef::new("jdbc/orders")],
            ..JndiConsumer::default()
        };
        let binding = binding_with_links(vec![ResourceLink {
            res_ref_name: "jdbc/orders".into(),
            res_id: Some("OrdersDS".into()),
        }]);
        let linked = link_resource_refs(&consumer, &binding);
        assert_eq!(linked.resource_refs[0].res_link.as_deref(), Some("OrdersDS"));
        assert!(consumer.resource_refs[0].res_link.is_none());
    }

    #[test]
    fn link_never_overwrites_with_absent_or_empty_id() {
        let mut declared = ResourceRef::new("jdbc/orders");
        declared.res_link = Some("DeclaredDS".into());
        let mut other = ResourceRef::new("jdbc/audit");
        other.res_link = Some("AuditDS".into());
        let consumer = JndiConsumer {
            resource_refs: vec![declared, other],
            ..JndiConsumer::default()
        };
        let binding = binding_with_links(vec![
            ResourceLink {
                res_ref_name: "jdbc/orders".into(),
                res_id: None,
            },
            ResourceLink {
                res_ref_name: "jdbc/audit".into(),
                res_id: Some(String::new()),
            },
        ]);
        let linked = link_resource_refs(&consumer, &binding);
        assert_eq!(linked.resource_refs[0].res_link.as_deref(), Some("DeclaredDS"));
        assert_eq!(linked.resource_refs[1].res_link.as_deref(), Some("AuditDS"));
    }

    #[test]
    fn default_builder_projects_resource_refs() {
        let consumer = JndiConsumer {
            resource_refs: vec![ResourceRef {
                res_ref_name: "jdbc/orders".into(),
                res_type: Some("javax.sql.DataSource".into()),
                res_auth: Some(ResAuth::Container),
                res_link: Some("OrdersDS".into()),
            }],
            ..JndiConsumer::default()
        };
        let env = DefaultEnvironmentBuilder
            .build(&[], &consumer, "OrderBean")
            .expect("build");
        assert_eq!(env.resource_refs.len(), 1);
        let res = &env.resource_refs[0];
        assert_eq!(res.ref_auth.as_deref(), Some("Container"));
        assert_eq!(res.resource_id.as_deref(), Some("OrdersDS"));
    }

    #[test]
    fn unresolved_ejb_link_leaves_deployment_id_empty() {
        let consumer = JndiConsumer {
            ejb_refs: vec![EjbRef {
                name: "ejb/Missing".into(),
                ejb_link: Some("other.jar#MissingBean".into()),
                ..EjbRef::default()
            }],
            ..JndiConsumer::default()
        };
        let env = DefaultEnvironmentBuilder
            .build(&[], &consumer, "OrderBean")
            .expect("build");
        assert_eq!(env.ejb_references[0].link.as_deref(), Some("other.jar#MissingBean"));
        assert!(env.ejb_references[0].deployment_id.is_none());
    }
}
