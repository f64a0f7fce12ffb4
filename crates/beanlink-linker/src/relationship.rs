//! Container-managed relationship linking.
//!
//! Each relationship adds one CMR field to each of its two source entities
//! and cross-links the pair through [`CmrFieldRef`] handles.

use std::collections::HashMap;

use beanlink_common::error::{BeanlinkError, Result};
use beanlink_model::relationship::{Multiplicity, Relationship, RelationshipRole};

use crate::plan::{CmrFieldInfo, CmrFieldRef, RelationshipPair, ResolvedPlan};

pub(crate) fn resolve(
    module: &str,
    relationships: &[Relationship],
    plan: &mut ResolvedPlan,
) -> Result<()> {
    let index: HashMap<String, usize> = plan
        .components
        .iter()
        .enumerate()
        .map(|(i, c)| (c.ejb_name.clone(), i))
        .collect();

    for (position, relationship) in relationships.iter().enumerate() {
        let [left_role, right_role] = relationship.roles.as_slice() else {
            return Err(BeanlinkError::MalformedRelationship {
                relation: relationship
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("#{position}")),
                roles: relationship.roles.len(),
                module: module.to_string(),
            });
        };

        let left = add_field(module, &index, plan, left_role)?;
        let right = add_field(module, &index, plan, right_role)?;
        set_mapped_by(plan, left, right);
        set_mapped_by(plan, right, left);

        tracing::debug!(
            relationship = relationship.name.as_deref().unwrap_or("<unnamed>"),
            left = %left_role.source_ejb_name,
            right = %right_role.source_ejb_name,
            "relationship linked"
        );
        plan.relationships.push(RelationshipPair {
            name: relationship.name.clone(),
            left,
            right,
        });
    }
    Ok(())
}

fn add_field(
    module: &str,
    index: &HashMap<String, usize>,
    plan: &mut ResolvedPlan,
    role: &RelationshipRole,
) -> Result<CmrFieldRef> {
    let source = &role.source_ejb_name;
    let component = *index
        .get(source)
        .ok_or_else(|| BeanlinkError::RoleSourceNotFound {
            ejb_name: source.clone(),
            module: module.to_string(),
        })?;
    let entity = plan.components[component]
        .entity_mut()
        .ok_or_else(|| BeanlinkError::RoleSourceNotEntity {
            ejb_name: source.clone(),
            module: module.to_string(),
        })?;

    let cmr_field = role.cmr_field.as_ref();
    entity.cmr_fields.push(CmrFieldInfo {
        role_source: source.clone(),
        role_name: role.role_name.clone(),
        field_name: cmr_field.map(|f| f.name.clone()),
        field_type: cmr_field.and_then(|f| f.field_type).map(|t| t.to_string()),
        cascade_delete: role.cascade_delete,
        many: role.multiplicity == Multiplicity::Many,
        mapped_by: None,
    });
    Ok(CmrFieldRef {
        component,
        field: entity.cmr_fields.len() - 1,
    })
}

fn set_mapped_by(plan: &mut ResolvedPlan, field: CmrFieldRef, opposite: CmrFieldRef) {
    if let Some(info) = plan
        .components
        .get_mut(field.component)
        .and_then(|c| c.entity_mut())
        .and_then(|e| e.cmr_fields.get_mut(field.field))
    {
        info.mapped_by = Some(opposite);
    }
}

#[cfg(test)]
mod tests {
    use beanlink_model::binding::{BindingTree, DeploymentBinding};
    use beanlink_model::declaration::{
        BeanCommon, DeclarationTree, EnterpriseBean, EntityBean, SessionBean,
    };
    use beanlink_model::relationship::{CmrField, CmrFieldType};

    use crate::diagnostics::CollectingSink;
    use crate::Linker;

    use super::*;

    fn entity(name: &str) -> EnterpriseBean {
        EnterpriseBean::Entity(EntityBean {
            common: BeanCommon::named(name),
            ..EntityBean::default()
        })
    }

    fn module(relationships: Vec<Relationship>) -> (DeclarationTree, BindingTree) {
        let declarations = DeclarationTree {
            beans: vec![
                entity("CustomerBean"),
                entity("OrderBean"),
                EnterpriseBean::Stateless(SessionBean {
                    common: BeanCommon::named("CheckoutBean"),
                    ..SessionBean::default()
                }),
            ],
            relationships: Some(relationships),
            ..DeclarationTree::default()
        };
        let bindings = BindingTree {
            deployments: vec![
                DeploymentBinding::new("CustomerBean", "customers", "CmpEntityContainer"),
                DeploymentBinding::new("OrderBean", "orders", "CmpEntityContainer"),
                DeploymentBinding::new("CheckoutBean", "checkout", "StatelessContainer"),
            ],
        };
        (declarations, bindings)
    }

    fn customer_orders() -> Relationship {
        Relationship {
            name: Some("Customer-Orders".into()),
            description: None,
            roles: vec![
                RelationshipRole {
                    role_name: Some("customer-has-orders".into()),
                    cmr_field: Some(CmrField {
                        name: "orders".into(),
                        field_type: Some(CmrFieldType::Collection),
                    }),
                    ..RelationshipRole::new("CustomerBean", Multiplicity::One)
                },
                RelationshipRole {
                    cascade_delete: true,
                    cmr_field: Some(CmrField {
                        name: "customer".into(),
                        field_type: None,
                    }),
                    ..RelationshipRole::new("OrderBean", Multiplicity::Many)
                },
            ],
        }
    }

    fn resolve(relationships: Vec<Relationship>) -> Result<ResolvedPlan> {
        let (declarations, bindings) = module(relationships);
        Linker::default().resolve(
            "shop.jar",
            &declarations,
            &bindings,
            &mut CollectingSink::default(),
        )
    }

    #[test]
    fn pair_is_mutually_linked() {
        let plan = resolve(vec![customer_orders()]).expect("links");
        let pair = &plan.relationships[0];
        assert_eq!(pair.name.as_deref(), Some("Customer-Orders"));

        let left = plan.cmr_field(pair.left).expect("left field");
        let right = plan.cmr_field(pair.right).expect("right field");
        assert_eq!(left.mapped_by, Some(pair.right));
        assert_eq!(right.mapped_by, Some(pair.left));
        assert_eq!(plan.opposite(pair.left), Some(right));

        assert_eq!(left.field_name.as_deref(), Some("orders"));
        assert_eq!(left.field_type.as_deref(), Some("java.util.Collection"));
        assert!(!left.many);
        assert!(right.many);
        assert!(right.cascade_delete);
        assert_eq!(right.role_source, "OrderBean");
    }

    #[test]
    fn self_relationship_links_two_fields_on_one_entity() {
        let relationship = Relationship {
            name: Some("Referrals".into()),
            description: None,
            roles: vec![
                RelationshipRole::new("CustomerBean", Multiplicity::One),
                RelationshipRole::new("CustomerBean", Multiplicity::Many),
            ],
        };
        let plan = resolve(vec![relationship]).expect("links");
        let pair = &plan.relationships[0];
        assert_eq!(pair.left.component, pair.right.component);
        assert_ne!(pair.left, pair.right);
        assert_eq!(plan.opposite(pair.right).map(|f| f.many), Some(false));
    }

    #[test]
    fn missing_role_source_is_fatal() {
        let mut relationship = customer_orders();
        relationship.roles[1].source_ejb_name = "InvoiceBean".into();
        let err = resolve(vec![relationship]).expect_err("no InvoiceBean");
        assert!(
            matches!(err, BeanlinkError::RoleSourceNotFound { ref ejb_name, .. } if ejb_name == "InvoiceBean")
        );
    }

    #[test]
    fn session_role_source_is_fatal() {
        let mut relationship = customer_orders();
        relationship.roles[0].source_ejb_name = "CheckoutBean".into();
        let err = resolve(vec![relationship]).expect_err("CheckoutBean is no entity");
        assert!(matches!(err, BeanlinkError::RoleSourceNotEntity { .. }));
        assert!(err.to_string().contains("shop.jar"));
    }

    #[test]
    fn unnamed_relationship_with_one_role_reports_position() {
        let mut relationship = customer_orders();
        relationship.name = None;
        let _ = relationship.roles.pop();
        let err = resolve(vec![customer_orders(), relationship]).expect_err("one role");
        assert!(matches!(
            err,
            BeanlinkError::MalformedRelationship { ref relation, roles: 1, .. } if relation == "#1"
        ));
    }
}
