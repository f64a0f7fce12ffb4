//! Assembly-level cross references.
//!
//! Runs only for modules that carry an assembly descriptor. Components are
//! matched to their declarations by position, which the linker preserves.

use beanlink_common::error::Result;
use beanlink_common::messages;
use beanlink_model::assembly::{AssemblyDescriptor, Interceptor, InterceptorBinding, Method};
use beanlink_model::declaration::DeclarationTree;
use beanlink_model::jndi::SecurityRoleRef;

use crate::builders::{callbacks, named_method};
use crate::linker::LinkContext;
use crate::plan::{
    InterceptorBindingInfo, InterceptorInfo, MethodInfo, MethodPermissionInfo,
    MethodTransactionInfo, ResolvedPlan, SecurityRoleInfo, SecurityRoleReferenceInfo,
};

/// Fills the plan's assembly lists and each component's role references.
pub(crate) fn resolve(
    ctx: &mut LinkContext<'_, '_>,
    declarations: &DeclarationTree,
    descriptor: &AssemblyDescriptor,
    plan: &mut ResolvedPlan,
) -> Result<()> {
    if let (Some(interceptors), Some(bindings)) =
        (&declarations.interceptors, &descriptor.interceptor_bindings)
    {
        plan.interceptors = interceptors.iter().map(interceptor).collect();
        plan.interceptor_bindings = bindings.iter().map(interceptor_binding).collect();
    }

    for role in &descriptor.security_roles {
        if !ctx.register_security_role(&role.role_name) {
            let args = vec![ctx.module.to_string(), role.role_name.clone()];
            ctx.warn(messages::DUPLICATE_SECURITY_ROLE, args);
        }
        plan.security_roles.push(SecurityRoleInfo {
            description: role.description.clone(),
            role_name: role.role_name.clone(),
        });
    }

    for permission in &descriptor.method_permissions {
        plan.method_permissions.push(MethodPermissionInfo {
            description: permission.description.clone(),
            role_names: permission.role_names.clone(),
            methods: method_infos(ctx, &permission.methods)?,
            unchecked: permission.unchecked,
        });
    }

    for transaction in &descriptor.container_transactions {
        plan.method_transactions.push(MethodTransactionInfo {
            description: transaction.description.clone(),
            trans_attribute: transaction.trans_attribute.to_string(),
            methods: method_infos(ctx, &transaction.methods)?,
        });
    }

    for (bean, component) in declarations.beans.iter().zip(&mut plan.components) {
        if let Some(refs) = bean.security_role_refs() {
            component.security_role_references = role_references(ctx, bean.name(), refs);
        }
    }

    Ok(())
}

fn interceptor(from: &Interceptor) -> InterceptorInfo {
    InterceptorInfo {
        class_name: from.interceptor_class.clone(),
        around_invoke: callbacks(&from.around_invoke),
        post_construct: callbacks(&from.post_construct),
        pre_destroy: callbacks(&from.pre_destroy),
        post_activate: callbacks(&from.post_activate),
        pre_passivate: callbacks(&from.pre_passivate),
    }
}

fn interceptor_binding(from: &InterceptorBinding) -> InterceptorBindingInfo {
    InterceptorBindingInfo {
        ejb_name: from.ejb_name.clone(),
        exclude_class_interceptors: from.exclude_class_interceptors,
        exclude_default_interceptors: from.exclude_default_interceptors,
        interceptors: from.interceptor_classes.clone(),
        interceptor_order: from.interceptor_order.clone().unwrap_or_default(),
        method: from.method.as_ref().map(named_method),
    }
}

fn method_infos(ctx: &LinkContext<'_, '_>, methods: &[Method]) -> Result<Vec<MethodInfo>> {
    methods
        .iter()
        .map(|method| -> Result<MethodInfo> {
            let binding = ctx.method_binding(&method.ejb_name, &method.method_name)?;
            Ok(MethodInfo {
                description: method.description.clone(),
                ejb_name: method.ejb_name.clone(),
                ejb_deployment_id: binding.deployment_id.clone(),
                method_intf: method.method_intf.map(|intf| intf.to_string()),
                method_name: method.method_name.clone(),
                method_params: method.method_params.clone(),
            })
        })
        .collect()
}

fn role_references(
    ctx: &mut LinkContext<'_, '_>,
    ejb_name: &str,
    refs: &[SecurityRoleRef],
) -> Vec<SecurityRoleReferenceInfo> {
    refs.iter()
        .map(|r| {
            let role_link = r.role_link.clone().unwrap_or_else(|| {
                let args = vec![r.role_name.clone(), ejb_name.to_string(), ctx.module.to_string()];
                ctx.warn(messages::DEFAULT_ROLE_LINK, args);
                ctx.config.default_security_role.clone()
            });
            SecurityRoleReferenceInfo {
                description: r.description.clone(),
                role_name: r.role_name.clone(),
                role_link,
            }
        })
        .collect()
}
