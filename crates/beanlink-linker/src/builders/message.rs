//! Message-driven beans.

use beanlink_common::config::LinkerConfig;
use beanlink_common::constants;
use beanlink_model::declaration::MessageDrivenBean;
use indexmap::IndexMap;

use crate::plan::{MessageDrivenInfo, ResolvedKind};

pub(super) fn build(bean: &MessageDrivenBean, config: &LinkerConfig) -> ResolvedKind {
    let mdb_interface = bean
        .messaging_type
        .clone()
        .unwrap_or_else(|| config.default_listener_interface.clone());

    let mut activation_properties = IndexMap::new();
    if let Some(destination_type) = &bean.message_destination_type {
        let _ = activation_properties.insert(
            constants::DESTINATION_TYPE_PROPERTY.to_string(),
            destination_type.clone(),
        );
    }
    for property in &bean.activation_config {
        let _ = activation_properties.insert(property.name.clone(), property.value.clone());
    }

    ResolvedKind::MessageDriven(MessageDrivenInfo {
        mdb_interface,
        activation_properties,
    })
}

#[cfg(test)]
mod tests {
    use beanlink_model::declaration::{ActivationConfigProperty, BeanCommon};

    use super::*;

    fn info(kind: ResolvedKind) -> MessageDrivenInfo {
        match kind {
            ResolvedKind::MessageDriven(info) => info,
            other => panic!("expected message-driven, got {other:?}"),
        }
    }

    fn property(name: &str, value: &str) -> ActivationConfigProperty {
        ActivationConfigProperty {
            name: name.into(),
            value: value.into(),
        }
    }

    #[test]
    fn listener_interface_defaults_when_absent() {
        let bean = MessageDrivenBean {
            common: BeanCommon::named("AuditListener"),
            ..MessageDrivenBean::default()
        };
        let resolved = info(build(&bean, &LinkerConfig::default()));
        assert_eq!(resolved.mdb_interface, "javax.jms.MessageListener");
        assert!(resolved.activation_properties.is_empty());
    }

    #[test]
    fn explicit_messaging_type_wins() {
        let bean = MessageDrivenBean {
            common: BeanCommon::named("MailListener"),
            messaging_type: Some("javax.mail.MessageListener".into()),
            ..MessageDrivenBean::default()
        };
        let resolved = info(build(&bean, &LinkerConfig::default()));
        assert_eq!(resolved.mdb_interface, "javax.mail.MessageListener");
    }

    #[test]
    fn activation_config_overrides_destination_type_in_place() {
        let bean = MessageDrivenBean {
            common: BeanCommon::named("AuditListener"),
            message_destination_type: Some("javax.jms.Queue".into()),
            activation_config: vec![
                property("destination", "audit"),
                property("destinationType", "javax.jms.Topic"),
                property("destination", "audit.v2"),
            ],
            ..MessageDrivenBean::default()
        };
        let resolved = info(build(&bean, &LinkerConfig::default()));
        let entries: Vec<(&str, &str)> = resolved
            .activation_properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![("destinationType", "javax.jms.Topic"), ("destination", "audit.v2")]
        );
        assert_eq!(
            resolved.activation_properties.get("destination").map(String::as_str),
            Some("audit.v2")
        );
    }
}
