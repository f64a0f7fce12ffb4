//! Formatted output helpers for CLI commands.
//!
//! Renders plans and diagnostics as plain text. Callers decide which
//! stream the text goes to.

use std::fmt::Write as _;

use beanlink_common::config::LinkerConfig;
use beanlink_linker::diagnostics::Warning;
use beanlink_linker::plan::{CmrFieldRef, ResolvedPlan};

const RULE: &str = "\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}";

/// Returns the container type bound to `container_id`, or `unconfigured`.
#[must_use]
pub fn container_label(config: &LinkerConfig, container_id: &str) -> String {
    config
        .container(container_id)
        .map_or_else(|| "unconfigured".to_string(), |c| c.container_type.to_string())
}

/// Renders a human-readable summary of `plan`.
#[must_use]
pub fn render_plan(plan: &ResolvedPlan, config: &LinkerConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Deployment Plan for: {} ({})", plan.module_id, plan.jar_path);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);

    for component in &plan.components {
        let _ = writeln!(out, "  + {} [{}]", component.ejb_name, component.component_kind());
        let _ = writeln!(out, "      deployment: {}", component.deployment_id);
        let _ = writeln!(
            out,
            "      container:  {} ({})",
            component.container_id,
            container_label(config, component.container_id.as_str())
        );
        if let Some(class) = &component.ejb_class {
            let _ = writeln!(out, "      class:      {class}");
        }
        if let Some(run_as) = &component.run_as {
            let _ = writeln!(out, "      run-as:     {run_as}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} component(s) will be deployed.", plan.components.len());

    if !plan.relationships.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Relationships:");
        for pair in &plan.relationships {
            let _ = writeln!(
                out,
                "    {}: {} <-> {}",
                pair.name.as_deref().unwrap_or("<unnamed>"),
                field_label(plan, pair.left),
                field_label(plan, pair.right)
            );
        }
    }

    if !plan.security_roles.is_empty() {
        let roles: Vec<&str> = plan.security_roles.iter().map(|r| r.role_name.as_str()).collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "  Security roles: {}", roles.join(", "));
    }
    if !plan.method_permissions.is_empty() || !plan.method_transactions.is_empty() {
        let _ = writeln!(
            out,
            "  {} method permission(s), {} method transaction(s)",
            plan.method_permissions.len(),
            plan.method_transactions.len()
        );
    }
    out
}

fn field_label(plan: &ResolvedPlan, handle: CmrFieldRef) -> String {
    plan.cmr_field(handle).map_or_else(
        || "?".to_string(),
        |field| match &field.field_name {
            Some(name) => format!("{}.{name}", field.role_source),
            None => field.role_source.clone(),
        },
    )
}

/// Renders one line per warning.
#[must_use]
pub fn render_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("warning[{}]: {}\n", w.key, w.message()))
        .collect()
}

#[cfg(test)]
mod tests {
    use beanlink_common::messages;
    use beanlink_linker::Linker;
    use beanlink_linker::diagnostics::CollectingSink;
    use beanlink_model::binding::{BindingTree, DeploymentBinding};
    use beanlink_model::declaration::{
        BeanCommon, DeclarationTree, EnterpriseBean, EntityBean, SessionBean,
    };
    use beanlink_model::relationship::{CmrField, Multiplicity, Relationship, RelationshipRole};

    use super::*;

    fn plan() -> ResolvedPlan {
        let mut customer_role = RelationshipRole::new("CustomerBean", Multiplicity::One);
        customer_role.cmr_field = Some(CmrField {
            name: "orders".into(),
            field_type: None,
        });
        let declarations = DeclarationTree {
            beans: vec![
                EnterpriseBean::Stateless(SessionBean {
                    common: BeanCommon::named("CheckoutBean"),
                    ..SessionBean::default()
                }),
                EnterpriseBean::Entity(EntityBean {
                    common: BeanCommon::named("CustomerBean"),
                    ..EntityBean::default()
                }),
                EnterpriseBean::Entity(EntityBean {
                    common: BeanCommon::named("OrderBean"),
                    ..EntityBean::default()
                }),
            ],
            relationships: Some(vec![Relationship {
                name: Some("Customer-Orders".into()),
                description: None,
                roles: vec![customer_role, RelationshipRole::new("OrderBean", Multiplicity::Many)],
            }]),
            ..DeclarationTree::default()
        };
        let bindings = BindingTree {
            deployments: vec![
                DeploymentBinding::new("CheckoutBean", "checkout", "StatelessContainer"),
                DeploymentBinding::new("CustomerBean", "customers", "CmpEntityContainer"),
                DeploymentBinding::new("OrderBean", "orders", "LegacyContainer"),
            ],
        };
        Linker::default()
            .resolve("apps/shop.jar", &declarations, &bindings, &mut CollectingSink::default())
            .expect("resolves")
    }

    #[test]
    fn container_label_falls_back_to_unconfigured() {
        let config = LinkerConfig::default();
        assert_eq!(container_label(&config, "StatelessContainer"), "STATELESS");
        assert_eq!(container_label(&config, "CmpEntityContainer"), "CMP_ENTITY");
        assert_eq!(container_label(&config, "LegacyContainer"), "unconfigured");
    }

    #[test]
    fn render_plan_lists_components_and_relationships() {
        let text = render_plan(&plan(), &LinkerConfig::default());
        assert!(text.starts_with("Deployment Plan for: shop (apps/shop.jar)"));
        assert!(text.contains("  + CheckoutBean [stateless]"));
        assert!(text.contains("      container:  StatelessContainer (STATELESS)"));
        assert!(text.contains("      container:  LegacyContainer (unconfigured)"));
        assert!(text.contains("  3 component(s) will be deployed."));
        assert!(text.contains("    Customer-Orders: CustomerBean.orders <-> OrderBean"));
        assert!(!text.contains("Security roles"));
    }

    #[test]
    fn render_warnings_one_line_each() {
        let warnings = vec![
            Warning {
                key: messages::DUPLICATE_SECURITY_ROLE,
                args: vec!["shop.jar".into(), "admin".into()],
            },
            Warning {
                key: messages::UNBOUND_DECLARATION,
                args: vec!["OrderBean".into(), "shop.jar".into()],
            },
        ];
        let text = render_warnings(&warnings);
        assert_eq!(
            text,
            "warning[conf.0102]: Module shop.jar declares security role admin more than once.\n\
             warning[conf.0018]: Bean OrderBean in module shop.jar has no deployment binding.\n"
        );
    }

    #[test]
    fn render_warnings_empty() {
        assert!(render_warnings(&[]).is_empty());
    }
}
