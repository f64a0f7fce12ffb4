//! Entity beans.

use beanlink_model::binding::DeploymentBinding;
use beanlink_model::declaration::{CmpVersion, EntityBean, PersistenceType, QueryMethod};

use crate::plan::{EntityInfo, NamedMethodInfo, QueryInfo, ResolvedKind};

pub(super) fn build(bean: &EntityBean, binding: &DeploymentBinding) -> ResolvedKind {
    let container_managed = bean.persistence_type == PersistenceType::Container;

    let cmp_version = container_managed.then_some(match bean.cmp_version {
        Some(CmpVersion::Cmp1) => 1,
        _ => 2,
    });

    let mut interfaces = bean.interfaces.clone();
    interfaces.business_local.clear();
    interfaces.business_remote.clear();

    ResolvedKind::Entity(EntityInfo {
        interfaces,
        abstract_schema_name: bean.abstract_schema_name.clone(),
        prim_key_class: bean.prim_key_class.clone(),
        prim_key_field: bean.primkey_field.clone(),
        persistence_type: bean.persistence_type.to_string(),
        reentrant: bean.reentrant.to_string(),
        cmp_version,
        cmp_field_names: bean.cmp_fields.clone(),
        queries: if container_managed {
            queries(bean, binding)
        } else {
            Vec::new()
        },
        cmr_fields: Vec::new(),
    })
}

// Declared queries first, then the binding's overrides. No deduplication.
fn queries(bean: &EntityBean, binding: &DeploymentBinding) -> Vec<QueryInfo> {
    let declared = bean.queries.iter().map(|q| QueryInfo {
        description: None,
        query_statement: q.ejb_ql.trim().to_string(),
        method: query_method(&q.query_method),
    });
    let overrides = binding.queries.iter().map(|q| QueryInfo {
        description: q.description.clone(),
        query_statement: q.object_ql.trim().to_string(),
        method: query_method(&q.query_method),
    });
    declared.chain(overrides).collect()
}

fn query_method(method: &QueryMethod) -> NamedMethodInfo {
    NamedMethodInfo {
        method_name: method.method_name.clone(),
        method_params: Some(method.method_params.clone()),
    }
}
