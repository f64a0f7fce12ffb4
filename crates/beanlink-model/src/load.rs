//! Materializes declaration and binding trees from JSON or YAML documents.
//!
//! The format is picked from the file extension. Declaration documents have
//! their `kind` discriminators checked before typed decoding so that an
//! unrecognized kind surfaces as [`BeanlinkError::UnknownKind`] rather than
//! a generic decoding error.

use std::path::Path;

use beanlink_common::error::{BeanlinkError, Result};
use beanlink_common::types::read_document;
use serde_json::Value;

use crate::binding::BindingTree;
use crate::declaration::{ComponentKind, DeclarationTree};

/// Loads a declaration document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if a bean
/// carries an unknown `kind`.
pub fn load_declarations(path: &Path) -> Result<DeclarationTree> {
    tracing::info!(path = %path.display(), "loading declaration document");
    declarations_from_value(read_document(path)?)
}

/// Loads a binding document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_bindings(path: &Path) -> Result<BindingTree> {
    tracing::info!(path = %path.display(), "loading binding document");
    bindings_from_value(read_document(path)?)
}

/// Decodes a declaration tree from an untyped document.
///
/// # Errors
///
/// Returns an error if a bean carries an unknown `kind` or the document
/// does not match the declaration schema.
pub fn declarations_from_value(value: Value) -> Result<DeclarationTree> {
    check_kinds(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Decodes a binding tree from an untyped document.
///
/// # Errors
///
/// Returns an error if the document does not match the binding schema.
pub fn bindings_from_value(value: Value) -> Result<BindingTree> {
    Ok(serde_json::from_value(value)?)
}

fn check_kinds(value: &Value) -> Result<()> {
    let Some(beans) = value.get("beans").and_then(Value::as_array) else {
        return Ok(());
    };
    for bean in beans {
        let kind = bean.get("kind").and_then(Value::as_str);
        if kind.and_then(ComponentKind::parse).is_none() {
            let ejb_name = bean
                .get("ejb_name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>");
            return Err(BeanlinkError::UnknownKind {
                ejb_name: ejb_name.to_string(),
                kind: kind.unwrap_or("<missing>").to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_kind_is_reported_with_bean_name() {
        let value = json!({ "beans": [{ "kind": "singleton", "ejb_name": "Cache" }] });
        let err = declarations_from_value(value).expect_err("unknown kind");
        assert!(err.is_internal());
        let msg = err.to_string();
        assert!(msg.contains("singleton") && msg.contains("Cache"), "got: {msg}");
    }

    #[test]
    fn missing_kind_is_reported() {
        let value = json!({ "beans": [{ "ejb_name": "Cache" }] });
        let err = declarations_from_value(value).expect_err("missing kind");
        assert!(err.to_string().contains("<missing>"), "got: {err}");
    }

    #[test]
    fn empty_document_decodes_to_empty_tree() {
        let tree = declarations_from_value(json!({})).expect("decode");
        assert!(tree.beans.is_empty());
        assert!(tree.assembly.is_none());
        let bindings = bindings_from_value(json!({})).expect("decode");
        assert!(bindings.is_empty());
    }
}
