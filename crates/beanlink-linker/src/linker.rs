//! The resolution entry point and its call-scoped link context.
//!
//! [`Linker::resolve`] runs the structural match first, then the
//! cross-reference passes. Every fatal condition short-circuits through `?`
//! so no partial plan ever escapes.

use std::collections::{HashMap, HashSet};
use std::fmt;

use beanlink_common::config::LinkerConfig;
use beanlink_common::constants;
use beanlink_common::error::{BeanlinkError, Result};
use beanlink_common::messages;
use beanlink_model::binding::{BindingTree, DeploymentBinding};
use beanlink_model::declaration::DeclarationTree;

use crate::diagnostics::DiagnosticsSink;
use crate::environment::{self, DefaultEnvironmentBuilder, EnvironmentBuilder};
use crate::plan::{self, ClasspathRegistration, ResolvedComponent, ResolvedPlan};
use crate::{assembly, builders, relationship};

/// Resolves modules into deployment plans.
///
/// A linker holds only configuration and its environment builder. All
/// tracking state lives in a per-call context, so one instance can resolve
/// any number of modules.
pub struct Linker {
    config: LinkerConfig,
    environment: Box<dyn EnvironmentBuilder>,
}

impl Linker {
    /// Creates a linker with the default environment builder.
    #[must_use]
    pub fn new(config: LinkerConfig) -> Self {
        Self {
            config,
            environment: Box::new(DefaultEnvironmentBuilder),
        }
    }

    /// Replaces the naming environment builder.
    #[must_use]
    pub fn with_environment_builder(mut self, builder: Box<dyn EnvironmentBuilder>) -> Self {
        self.environment = builder;
        self
    }

    /// Returns the configuration this linker was created with.
    #[must_use]
    pub const fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Resolves one module.
    ///
    /// `module_path` identifies the module in messages and becomes the
    /// plan's `jar_path` and every component's codebase. Non-fatal
    /// conditions are reported to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two trees disagree structurally, a deployment
    /// id is used twice, a method reference names an unbound bean, or a
    /// relationship cannot be linked.
    pub fn resolve(
        &self,
        module_path: &str,
        declarations: &DeclarationTree,
        bindings: &BindingTree,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<ResolvedPlan> {
        tracing::info!(
            module = module_path,
            declared = declarations.beans.len(),
            deployed = bindings.len(),
            "resolving module"
        );

        let mut ctx = LinkContext::new(module_path, &self.config, bindings, sink);
        ctx.check_counts(declarations)?;

        let mut components = Vec::with_capacity(declarations.beans.len());
        for bean in &declarations.beans {
            let binding = ctx.binding(bean.name())?;
            let mut component = builders::build_component(bean, binding, &self.config);
            ctx.register_deployment_id(&component)?;

            component.codebase = module_path.to_string();
            component.run_as = bean
                .common()
                .security_identity
                .as_ref()
                .and_then(|identity| identity.run_as.clone());

            tracing::debug!(
                bean = %component.ejb_name,
                kind = %component.component_kind(),
                deployment_id = %component.deployment_id,
                "component built"
            );
            components.push(component);
        }

        self.link_environments(&ctx, declarations, &mut components)?;

        let mut plan = ResolvedPlan {
            jar_path: module_path.to_string(),
            module_id: plan::module_id(module_path),
            components,
            interceptors: Vec::new(),
            interceptor_bindings: Vec::new(),
            security_roles: Vec::new(),
            method_permissions: Vec::new(),
            method_transactions: Vec::new(),
            relationships: Vec::new(),
            classpath: self.classpath_registration(),
        };

        if let Some(descriptor) = &declarations.assembly {
            assembly::resolve(&mut ctx, declarations, descriptor, &mut plan)?;
        }
        if let Some(relationships) = &declarations.relationships {
            relationship::resolve(module_path, relationships, &mut plan)?;
        }

        tracing::info!(
            module = module_path,
            module_id = %plan.module_id,
            components = plan.components.len(),
            relationships = plan.relationships.len(),
            "module resolved"
        );
        Ok(plan)
    }

    // Environments see the whole component list, so they are built after
    // every component exists and assigned afterwards.
    fn link_environments(
        &self,
        ctx: &LinkContext<'_, '_>,
        declarations: &DeclarationTree,
        components: &mut [ResolvedComponent],
    ) -> Result<()> {
        let mut environments = Vec::with_capacity(components.len());
        for bean in &declarations.beans {
            let binding = ctx.binding(bean.name())?;
            let consumer = environment::link_resource_refs(&bean.common().environment, binding);
            environments.push(self.environment.build(components, &consumer, bean.name())?);
        }
        for (component, jndi_enc) in components.iter_mut().zip(environments) {
            component.jndi_enc = jndi_enc;
        }
        Ok(())
    }

    fn classpath_registration(&self) -> ClasspathRegistration {
        match self.config.loader_mode() {
            Some(constants::SKIPPED_LOADER_MODE) => ClasspathRegistration::Skipped,
            _ => ClasspathRegistration::Requested,
        }
    }
}

impl Default for Linker {
    fn default() -> Self {
        Self::new(LinkerConfig::default())
    }
}

impl fmt::Debug for Linker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State that lives for exactly one [`Linker::resolve`] call.
pub(crate) struct LinkContext<'a, 's> {
    pub(crate) module: &'a str,
    pub(crate) config: &'a LinkerConfig,
    bindings: HashMap<&'a str, &'a DeploymentBinding>,
    deployment_count: usize,
    deployment_ids: HashSet<String>,
    security_roles: HashSet<String>,
    sink: &'s mut dyn DiagnosticsSink,
}

impl<'a, 's> LinkContext<'a, 's> {
    pub(crate) fn new(
        module: &'a str,
        config: &'a LinkerConfig,
        bindings: &'a BindingTree,
        sink: &'s mut dyn DiagnosticsSink,
    ) -> Self {
        Self {
            module,
            config,
            bindings: bindings.deployments_by_name(),
            deployment_count: bindings.len(),
            deployment_ids: HashSet::new(),
            security_roles: HashSet::new(),
            sink,
        }
    }

    /// Fails when the two trees hold different numbers of beans, after
    /// reporting every declaration that has no binding.
    fn check_counts(&mut self, declarations: &DeclarationTree) -> Result<()> {
        let declared = declarations.beans.len();
        if declared == self.deployment_count {
            return Ok(());
        }

        for bean in &declarations.beans {
            if !self.bindings.contains_key(bean.name()) {
                let args = vec![bean.name().to_string(), self.module.to_string()];
                self.warn(messages::UNBOUND_DECLARATION, args);
            }
        }

        let deployed = self.deployment_count;
        tracing::warn!(
            key = messages::COUNT_MISMATCH,
            "{}",
            messages::format(
                messages::COUNT_MISMATCH,
                &[self.module.to_string(), declared.to_string(), deployed.to_string()],
            )
        );
        Err(BeanlinkError::CountMismatch {
            module: self.module.to_string(),
            declared,
            deployed,
        })
    }

    /// Looks up the binding of a declared bean.
    pub(crate) fn binding(&self, ejb_name: &str) -> Result<&'a DeploymentBinding> {
        self.bindings
            .get(ejb_name)
            .copied()
            .ok_or_else(|| BeanlinkError::MissingBinding {
                ejb_name: ejb_name.to_string(),
                module: self.module.to_string(),
            })
    }

    /// Looks up the binding a method reference points at.
    pub(crate) fn method_binding(
        &self,
        ejb_name: &str,
        method_name: &str,
    ) -> Result<&'a DeploymentBinding> {
        self.bindings
            .get(ejb_name)
            .copied()
            .ok_or_else(|| BeanlinkError::UnresolvedMethod {
                ejb_name: ejb_name.to_string(),
                method_name: method_name.to_string(),
                module: self.module.to_string(),
            })
    }

    fn register_deployment_id(&mut self, component: &ResolvedComponent) -> Result<()> {
        let id = component.deployment_id.as_str();
        if self.deployment_ids.insert(id.to_string()) {
            return Ok(());
        }

        tracing::warn!(
            key = messages::DUPLICATE_DEPLOYMENT_ID,
            "{}",
            messages::format(
                messages::DUPLICATE_DEPLOYMENT_ID,
                &[id, self.module, component.ejb_name.as_str()],
            )
        );
        Err(BeanlinkError::DuplicateDeploymentId {
            deployment_id: id.to_string(),
            module: self.module.to_string(),
            ejb_name: component.ejb_name.clone(),
        })
    }

    /// Records a security role name. Returns `false` if the module already
    /// declared it.
    pub(crate) fn register_security_role(&mut self, role_name: &str) -> bool {
        self.security_roles.insert(role_name.to_string())
    }

    /// Forwards a non-fatal diagnostic to the sink.
    pub(crate) fn warn(&mut self, key: &'static str, args: Vec<String>) {
        tracing::debug!(key, module = self.module, "diagnostic recorded");
        self.sink.warning(key, args);
    }
}

#[cfg(test)]
mod tests {
    use beanlink_model::declaration::{BeanCommon, EnterpriseBean, SessionBean};

    use super::*;
    use crate::diagnostics::CollectingSink;

    fn stateless(name: &str) -> EnterpriseBean {
        EnterpriseBean::Stateless(SessionBean {
            common: BeanCommon::named(name),
            ..SessionBean::default()
        })
    }

    fn bindings(entries: &[(&str, &str)]) -> BindingTree {
        BindingTree {
            deployments: entries
                .iter()
                .map(|(name, id)| DeploymentBinding::new(*name, *id, "StatelessContainer"))
                .collect(),
        }
    }

    #[test]
    fn context_tracks_roles_per_call() {
        let config = LinkerConfig::default();
        let tree = bindings(&[]);
        let mut sink = CollectingSink::default();

        let mut first = LinkContext::new("a.jar", &config, &tree, &mut sink);
        assert!(first.register_security_role("admin"));
        assert!(!first.register_security_role("admin"));
        drop(first);

        let mut second = LinkContext::new("b.jar", &config, &tree, &mut sink);
        assert!(second.register_security_role("admin"));
    }

    #[test]
    fn method_binding_reports_unresolved_method() {
        let config = LinkerConfig::default();
        let tree = bindings(&[("OrderBean", "orders")]);
        let mut sink = CollectingSink::default();
        let ctx = LinkContext::new("m.jar", &config, &tree, &mut sink);

        let found = ctx.method_binding("OrderBean", "place").expect("bound");
        assert_eq!(found.deployment_id.as_str(), "orders");

        let err = ctx.method_binding("Ghost", "haunt").expect_err("unbound");
        assert!(err.is_internal());
        assert!(err.to_string().contains("haunt"));
    }

    #[test]
    fn missing_binding_with_equal_counts_is_fatal() {
        let declarations = DeclarationTree {
            beans: vec![stateless("OrderBean")],
            ..DeclarationTree::default()
        };
        let tree = bindings(&[("InvoiceBean", "invoices")]);
        let mut sink = CollectingSink::default();

        let err = Linker::default()
            .resolve("m.jar", &declarations, &tree, &mut sink)
            .expect_err("no binding for OrderBean");
        assert!(matches!(err, BeanlinkError::MissingBinding { ref ejb_name, .. } if ejb_name == "OrderBean"));
        assert!(err.to_string().contains("redeploy required"));
        assert!(sink.is_empty());
    }

    #[test]
    fn loader_mode_controls_classpath_registration() {
        let declarations = DeclarationTree {
            beans: vec![stateless("OrderBean")],
            ..DeclarationTree::default()
        };
        let tree = bindings(&[("OrderBean", "orders")]);

        let mut config = LinkerConfig::default();
        let _ = config
            .properties
            .insert("openejb.loader".into(), "tomcat-webapp".into());
        let skipped = Linker::new(config)
            .resolve("m.jar", &declarations, &tree, &mut CollectingSink::default())
            .expect("resolves");
        assert_eq!(skipped.classpath, ClasspathRegistration::Skipped);

        let requested = Linker::default()
            .resolve("m.jar", &declarations, &tree, &mut CollectingSink::default())
            .expect("resolves");
        assert_eq!(requested.classpath, ClasspathRegistration::Requested);
    }

    #[test]
    fn codebase_and_run_as_are_recorded() {
        let mut bean = SessionBean {
            common: BeanCommon::named("OrderBean"),
            ..SessionBean::default()
        };
        bean.common.security_identity = Some(beanlink_model::declaration::SecurityIdentity {
            run_as: Some("auditor".into()),
            ..Default::default()
        });
        let declarations = DeclarationTree {
            beans: vec![EnterpriseBean::Stateless(bean)],
            ..DeclarationTree::default()
        };
        let tree = bindings(&[("OrderBean", "orders")]);

        let plan = Linker::default()
            .resolve("apps/orders.jar", &declarations, &tree, &mut CollectingSink::default())
            .expect("resolves");
        let component = plan.component("OrderBean").expect("component");
        assert_eq!(component.codebase, "apps/orders.jar");
        assert_eq!(component.run_as.as_deref(), Some("auditor"));
    }
}
