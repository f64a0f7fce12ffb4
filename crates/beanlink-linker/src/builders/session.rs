//! Stateless and stateful session beans.

use beanlink_model::declaration::SessionBean;

use super::{callbacks, named_method};
use crate::plan::{InitMethodInfo, RemoveMethodInfo, ResolvedKind, SessionInfo, StatefulInfo};

pub(super) fn stateless(bean: &SessionBean) -> ResolvedKind {
    ResolvedKind::Stateless(SessionInfo {
        interfaces: bean.interfaces.clone(),
    })
}

pub(super) fn stateful(bean: &SessionBean) -> ResolvedKind {
    ResolvedKind::Stateful(StatefulInfo {
        interfaces: bean.interfaces.clone(),
        post_activate: callbacks(&bean.post_activate),
        pre_passivate: callbacks(&bean.pre_passivate),
        init_methods: bean
            .init_methods
            .iter()
            .map(|m| InitMethodInfo {
                bean_method: named_method(&m.bean_method),
                create_method: named_method(&m.create_method),
            })
            .collect(),
        remove_methods: bean
            .remove_methods
            .iter()
            .map(|m| RemoveMethodInfo {
                bean_method: named_method(&m.bean_method),
                retain_if_exception: m.retain_if_exception,
            })
            .collect(),
    })
}
