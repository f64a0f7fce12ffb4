//! Message catalogue for diagnostics.
//!
//! Warnings travel as a key plus positional arguments so that sinks can
//! decide how to render them. [`format`] produces the English text.

/// Bean count in the declaration document differs from the binding document.
pub const COUNT_MISMATCH: &str = "conf.0008";
/// Security-role reference without a role link; the default role was used.
pub const DEFAULT_ROLE_LINK: &str = "conf.0009";
/// Declaration without a deployment binding.
pub const UNBOUND_DECLARATION: &str = "conf.0018";
/// Deployment id used by more than one bean of a module.
pub const DUPLICATE_DEPLOYMENT_ID: &str = "conf.0100";
/// Security role declared more than once in a module.
pub const DUPLICATE_SECURITY_ROLE: &str = "conf.0102";

const CATALOGUE: &[(&str, &str)] = &[
    (
        COUNT_MISMATCH,
        "Cannot link module {0}: it declares {1} beans but its binding document deploys {2}.",
    ),
    (
        DEFAULT_ROLE_LINK,
        "Security role reference {0} of bean {1} in module {2} has no role link; it is linked to the default role.",
    ),
    (
        UNBOUND_DECLARATION,
        "Bean {0} in module {1} has no deployment binding.",
    ),
    (
        DUPLICATE_DEPLOYMENT_ID,
        "Deployment id {0} is used more than once in module {1}, second occurrence in bean {2}.",
    ),
    (
        DUPLICATE_SECURITY_ROLE,
        "Module {0} declares security role {1} more than once.",
    ),
];

/// Returns the template registered for `key`, if any.
#[must_use]
pub fn template(key: &str) -> Option<&'static str> {
    CATALOGUE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, template)| *template)
}

/// Renders the message for `key`, substituting `{N}` placeholders with
/// the positional `args`.
///
/// Unknown keys render as the key followed by the arguments. Placeholders
/// without a matching argument are left in place.
#[must_use]
pub fn format<S: AsRef<str>>(key: &str, args: &[S]) -> String {
    let Some(template) = template(key) else {
        let joined: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        return format!("{key} {}", joined.join(" ")).trim_end().to_string();
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg.as_ref(), close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_substitutes_positional_arguments() {
        let msg = format(UNBOUND_DECLARATION, &["OrderBean", "orders.jar"]);
        assert_eq!(msg, "Bean OrderBean in module orders.jar has no deployment binding.");
    }

    #[test]
    fn format_keeps_placeholder_without_argument() {
        let msg = format(UNBOUND_DECLARATION, &["OrderBean"]);
        assert!(msg.ends_with("in module {1} has no deployment binding."), "got: {msg}");
    }

    #[test]
    fn format_does_not_expand_placeholders_inside_arguments() {
        let msg = format(DUPLICATE_SECURITY_ROLE, &["{1}", "admin"]);
        assert_eq!(msg, "Module {1} declares security role admin more than once.");
    }

    #[test]
    fn format_unknown_key_lists_arguments() {
        assert_eq!(format("conf.9999", &["a", "b"]), "conf.9999 a b");
        assert_eq!(format::<&str>("conf.9999", &[]), "conf.9999");
    }

    #[test]
    fn every_key_has_a_template() {
        for key in [
            COUNT_MISMATCH,
            DEFAULT_ROLE_LINK,
            UNBOUND_DECLARATION,
            DUPLICATE_DEPLOYMENT_ID,
            DUPLICATE_SECURITY_ROLE,
        ] {
            assert!(template(key).is_some(), "missing template for {key}");
        }
    }
}
