//! Kind-specific component builders.
//!
//! [`build_component`] is the single dispatch point over the closed set of
//! bean kinds. Each builder copies the shared metadata, assigns the
//! binding's identity, and fills in its kind's data.

pub mod entity;
pub mod message;
pub mod session;

use beanlink_common::config::LinkerConfig;
use beanlink_common::constants;
use beanlink_model::binding::DeploymentBinding;
use beanlink_model::declaration::{BeanCommon, EnterpriseBean};
use beanlink_model::{CallbackMethod, NamedMethod};

use crate::environment::JndiEnvironment;
use crate::plan::{CallbackInfo, NamedMethodInfo, ResolvedComponent, ResolvedKind};

/// Builds the resolved component for `bean` using its `binding`.
///
/// The codebase, run-as identity, naming environment and security-role
/// references are filled in later by the linker.
#[must_use]
pub fn build_component(
    bean: &EnterpriseBean,
    binding: &DeploymentBinding,
    config: &LinkerConfig,
) -> ResolvedComponent {
    match bean {
        EnterpriseBean::Stateless(s) => base(
            &s.common,
            binding,
            transaction_type(&s.common),
            session::stateless(s),
        ),
        EnterpriseBean::Stateful(s) => base(
            &s.common,
            binding,
            transaction_type(&s.common),
            session::stateful(s),
        ),
        EnterpriseBean::Entity(e) => base(
            &e.common,
            binding,
            constants::CONTAINER_TRANSACTION_TYPE.to_string(),
            entity::build(e, binding),
        ),
        EnterpriseBean::MessageDriven(m) => base(
            &m.common,
            binding,
            transaction_type(&m.common),
            message::build(m, config),
        ),
    }
}

fn base(
    common: &BeanCommon,
    binding: &DeploymentBinding,
    transaction_type: String,
    kind: ResolvedKind,
) -> ResolvedComponent {
    let icon = common.icon.as_ref();
    ResolvedComponent {
        ejb_name: common.ejb_name.clone(),
        deployment_id: binding.deployment_id.clone(),
        container_id: binding.container_id.clone(),
        codebase: String::new(),
        ejb_class: common.ejb_class.clone(),
        description: common.description.clone(),
        display_name: common.display_name.clone(),
        small_icon: icon.and_then(|i| i.small_icon.clone()),
        large_icon: icon.and_then(|i| i.large_icon.clone()),
        transaction_type,
        around_invoke: callbacks(&common.around_invoke),
        post_construct: callbacks(&common.post_construct),
        pre_destroy: callbacks(&common.pre_destroy),
        timeout_method: common.timeout_method.as_ref().map(named_method),
        run_as: None,
        jndi_enc: JndiEnvironment::default(),
        security_role_references: Vec::new(),
        kind,
    }
}

// Container-managed unless the bean says otherwise.
fn transaction_type(common: &BeanCommon) -> String {
    common.transaction_type.map_or_else(
        || constants::CONTAINER_TRANSACTION_TYPE.to_string(),
        |t| t.to_string(),
    )
}

pub(crate) fn callbacks(from: &[CallbackMethod]) -> Vec<CallbackInfo> {
    from.iter()
        .map(|c| CallbackInfo {
            class_name: c.class_name.clone(),
            method: c.method_name.clone(),
        })
        .collect()
}

pub(crate) fn named_method(method: &NamedMethod) -> NamedMethodInfo {
    NamedMethodInfo {
        method_name: method.method_name.clone(),
        method_params: method.method_params.clone(),
    }
}
