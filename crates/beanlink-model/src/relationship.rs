//! Container-managed relationships between entity beans.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A relationship between two entity beans.
///
/// Well-formed relationships have exactly two roles; the linker rejects any
/// other count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The two sides of the relationship.
    #[serde(default)]
    pub roles: Vec<RelationshipRole>,
}

/// One side of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRole {
    /// Role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// How many instances of the source take part.
    pub multiplicity: Multiplicity,
    /// Delete this side when the other side is deleted.
    #[serde(default)]
    pub cascade_delete: bool,
    /// Logical name of the entity bean on this side.
    pub source_ejb_name: String,
    /// Field navigating to the other side; absent for unidirectional roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmr_field: Option<CmrField>,
}

impl RelationshipRole {
    /// Creates a role without a navigable field.
    #[must_use]
    pub fn new(source_ejb_name: impl Into<String>, multiplicity: Multiplicity) -> Self {
        Self {
            role_name: None,
            multiplicity,
            cascade_delete: false,
            source_ejb_name: source_ejb_name.into(),
            cmr_field: None,
        }
    }
}

/// Relationship multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    /// At most one instance.
    One,
    /// Any number of instances.
    Many,
}

/// A container-managed relationship field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmrField {
    /// Field name.
    pub name: String,
    /// Collection type of a many-valued field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<CmrFieldType>,
}

/// Collection type of a many-valued relationship field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmrFieldType {
    /// Unordered collection allowing duplicates.
    #[serde(rename = "java.util.Collection")]
    Collection,
    /// Set without duplicates.
    #[serde(rename = "java.util.Set")]
    Set,
}

impl fmt::Display for CmrFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "java.util.Collection"),
            Self::Set => write!(f, "java.util.Set"),
        }
    }
}
