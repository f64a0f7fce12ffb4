//! The resolved deployment plan handed to the runtime.
//!
//! Everything here is produced by a single [`crate::Linker::resolve`] call
//! and is read-only afterwards.

use std::path::Path;

use beanlink_common::constants;
use beanlink_common::types::{ContainerId, DeploymentId};
use beanlink_model::declaration::{BeanInterfaces, ComponentKind};
use indexmap::IndexMap;
use serde::Serialize;

use crate::environment::JndiEnvironment;

/// A fully cross-referenced module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlan {
    /// Path the module was loaded from.
    pub jar_path: String,
    /// Module file name without its archive extension.
    pub module_id: String,
    /// One entry per declared bean, in declaration order.
    pub components: Vec<ResolvedComponent>,
    /// Interceptor classes.
    pub interceptors: Vec<InterceptorInfo>,
    /// Interceptor bindings.
    pub interceptor_bindings: Vec<InterceptorBindingInfo>,
    /// Security roles, duplicates included.
    pub security_roles: Vec<SecurityRoleInfo>,
    /// Method permissions.
    pub method_permissions: Vec<MethodPermissionInfo>,
    /// Method transaction attributes.
    pub method_transactions: Vec<MethodTransactionInfo>,
    /// Linked relationship pairs.
    pub relationships: Vec<RelationshipPair>,
    /// Whether the module should be put on the classpath by the loader.
    pub classpath: ClasspathRegistration,
}

impl ResolvedPlan {
    /// Returns the component with the given logical name.
    #[must_use]
    pub fn component(&self, ejb_name: &str) -> Option<&ResolvedComponent> {
        self.components.iter().find(|c| c.ejb_name == ejb_name)
    }

    /// Dereferences a CMR field handle.
    #[must_use]
    pub fn cmr_field(&self, handle: CmrFieldRef) -> Option<&CmrFieldInfo> {
        self.components
            .get(handle.component)?
            .entity()?
            .cmr_fields
            .get(handle.field)
    }

    /// Returns the opposite side of the relationship `handle` belongs to.
    #[must_use]
    pub fn opposite(&self, handle: CmrFieldRef) -> Option<&CmrFieldInfo> {
        let mapped_by = self.cmr_field(handle)?.mapped_by?;
        self.cmr_field(mapped_by)
    }
}

/// Derives the module id from a module path: its file name without the
/// archive extension.
#[must_use]
pub fn module_id(jar_path: &str) -> String {
    let file_name = Path::new(jar_path)
        .file_name()
        .map_or_else(|| jar_path.to_string(), |n| n.to_string_lossy().into_owned());
    file_name
        .strip_suffix(constants::MODULE_ARCHIVE_EXTENSION)
        .map_or_else(|| file_name.clone(), str::to_string)
}

/// Outcome of the module-loader check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClasspathRegistration {
    /// The loader should add the module to its classpath.
    Requested,
    /// The active loader mode manages the classpath itself.
    Skipped,
}

/// A bean matched with its binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedComponent {
    /// Logical bean name.
    pub ejb_name: String,
    /// Deployment id from the binding.
    pub deployment_id: DeploymentId,
    /// Container id from the binding.
    pub container_id: ContainerId,
    /// Module path the bean was loaded from.
    pub codebase: String,
    /// Implementation class.
    pub ejb_class: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Small icon.
    pub small_icon: Option<String>,
    /// Large icon.
    pub large_icon: Option<String>,
    /// `Container` or `Bean`.
    pub transaction_type: String,
    /// Around-invoke callbacks.
    pub around_invoke: Vec<CallbackInfo>,
    /// Post-construct callbacks.
    pub post_construct: Vec<CallbackInfo>,
    /// Pre-destroy callbacks.
    pub pre_destroy: Vec<CallbackInfo>,
    /// Timer timeout method.
    pub timeout_method: Option<NamedMethodInfo>,
    /// Run-as role copied from the security identity.
    pub run_as: Option<String>,
    /// Resolved naming environment.
    pub jndi_enc: JndiEnvironment,
    /// Security-role references with their links resolved.
    pub security_role_references: Vec<SecurityRoleReferenceInfo>,
    /// Kind-specific data.
    pub kind: ResolvedKind,
}

impl ResolvedComponent {
    /// Kind discriminator.
    #[must_use]
    pub const fn component_kind(&self) -> ComponentKind {
        match self.kind {
            ResolvedKind::Stateless(_) => ComponentKind::Stateless,
            ResolvedKind::Stateful(_) => ComponentKind::Stateful,
            ResolvedKind::Entity(_) => ComponentKind::Entity,
            ResolvedKind::MessageDriven(_) => ComponentKind::MessageDriven,
        }
    }

    /// Entity data, if this is an entity bean.
    #[must_use]
    pub const fn entity(&self) -> Option<&EntityInfo> {
        match &self.kind {
            ResolvedKind::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn entity_mut(&mut self) -> Option<&mut EntityInfo> {
        match &mut self.kind {
            ResolvedKind::Entity(e) => Some(e),
            _ => None,
        }
    }
}

/// Kind-specific resolved data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResolvedKind {
    /// Stateless session bean.
    Stateless(SessionInfo),
    /// Stateful session bean.
    Stateful(StatefulInfo),
    /// Entity bean.
    Entity(EntityInfo),
    /// Message-driven bean.
    MessageDriven(MessageDrivenInfo),
}

/// Stateless session data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// Client-view interfaces.
    pub interfaces: BeanInterfaces,
}

/// Stateful session data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatefulInfo {
    /// Client-view interfaces.
    pub interfaces: BeanInterfaces,
    /// Post-activate callbacks.
    pub post_activate: Vec<CallbackInfo>,
    /// Pre-passivate callbacks.
    pub pre_passivate: Vec<CallbackInfo>,
    /// Init methods, in declaration order.
    pub init_methods: Vec<InitMethodInfo>,
    /// Remove methods, in declaration order.
    pub remove_methods: Vec<RemoveMethodInfo>,
}

/// An init method and the create method it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitMethodInfo {
    /// Bean-side method.
    pub bean_method: NamedMethodInfo,
    /// Home create method.
    pub create_method: NamedMethodInfo,
}

/// A stateful remove method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveMethodInfo {
    /// Bean-side method.
    pub bean_method: NamedMethodInfo,
    /// Keep the instance when the method throws.
    pub retain_if_exception: bool,
}

/// Entity data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    /// Client-view interfaces.
    pub interfaces: BeanInterfaces,
    /// Schema name used by queries.
    pub abstract_schema_name: Option<String>,
    /// Primary key class.
    pub prim_key_class: Option<String>,
    /// Primary key field.
    pub prim_key_field: Option<String>,
    /// `Container` or `Bean`.
    pub persistence_type: String,
    /// `true` or `false`.
    pub reentrant: String,
    /// CMP version, only for container-managed persistence.
    pub cmp_version: Option<u8>,
    /// Container-managed field names.
    pub cmp_field_names: Vec<String>,
    /// Declarative queries followed by binding overrides.
    pub queries: Vec<QueryInfo>,
    /// Relationship fields, appended during relationship resolution.
    pub cmr_fields: Vec<CmrFieldInfo>,
}

/// A resolved query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryInfo {
    /// Free-form description.
    pub description: Option<String>,
    /// Trimmed query text.
    pub query_statement: String,
    /// Method the query implements.
    pub method: NamedMethodInfo,
}

/// Handle to one CMR field: a component index and a field index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CmrFieldRef {
    /// Index into [`ResolvedPlan::components`].
    pub component: usize,
    /// Index into that entity's [`EntityInfo::cmr_fields`].
    pub field: usize,
}

/// One side of a resolved relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmrFieldInfo {
    /// Logical name of the entity owning the field.
    pub role_source: String,
    /// Role name.
    pub role_name: Option<String>,
    /// Field name; `None` for unidirectional roles.
    pub field_name: Option<String>,
    /// Collection type of a many-valued field.
    pub field_type: Option<String>,
    /// Delete with the opposite side.
    pub cascade_delete: bool,
    /// Many-valued multiplicity.
    pub many: bool,
    /// The opposite side.
    pub mapped_by: Option<CmrFieldRef>,
}

/// Two cross-linked relationship sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipPair {
    /// Relationship name.
    pub name: Option<String>,
    /// First declared role.
    pub left: CmrFieldRef,
    /// Second declared role.
    pub right: CmrFieldRef,
}

/// Message-driven data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDrivenInfo {
    /// Message listener interface.
    pub mdb_interface: String,
    /// Activation properties in declaration order. A repeated name keeps
    /// its first position and takes the last value.
    pub activation_properties: IndexMap<String, String>,
}

/// A callback method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackInfo {
    /// Declaring class, if not the bean class.
    pub class_name: Option<String>,
    /// Method name.
    pub method: String,
}

/// A method identified by name and optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedMethodInfo {
    /// Method name.
    pub method_name: String,
    /// Parameter types; every overload when `None`.
    pub method_params: Option<Vec<String>>,
}

/// A method reference resolved to its bean's deployment id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    /// Free-form description.
    pub description: Option<String>,
    /// Logical bean name.
    pub ejb_name: String,
    /// Deployment id of that bean.
    pub ejb_deployment_id: DeploymentId,
    /// Interface restriction.
    pub method_intf: Option<String>,
    /// Method name.
    pub method_name: String,
    /// Parameter types.
    pub method_params: Option<Vec<String>>,
}

/// A method permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodPermissionInfo {
    /// Free-form description.
    pub description: Option<String>,
    /// Roles granted access.
    pub role_names: Vec<String>,
    /// Methods covered.
    pub methods: Vec<MethodInfo>,
    /// Callable without a role.
    pub unchecked: bool,
}

/// A method transaction attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodTransactionInfo {
    /// Free-form description.
    pub description: Option<String>,
    /// Transaction attribute name.
    pub trans_attribute: String,
    /// Methods covered.
    pub methods: Vec<MethodInfo>,
}

/// A security role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRoleInfo {
    /// Free-form description.
    pub description: Option<String>,
    /// Role name.
    pub role_name: String,
}

/// A security-role reference with its link resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRoleReferenceInfo {
    /// Free-form description.
    pub description: Option<String>,
    /// Role name as used in code.
    pub role_name: String,
    /// Linked logical role, or the default role.
    pub role_link: String,
}

/// An interceptor class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterceptorInfo {
    /// Interceptor class.
    pub class_name: String,
    /// Around-invoke callbacks.
    pub around_invoke: Vec<CallbackInfo>,
    /// Post-construct callbacks.
    pub post_construct: Vec<CallbackInfo>,
    /// Pre-destroy callbacks.
    pub pre_destroy: Vec<CallbackInfo>,
    /// Post-activate callbacks.
    pub post_activate: Vec<CallbackInfo>,
    /// Pre-passivate callbacks.
    pub pre_passivate: Vec<CallbackInfo>,
}

/// An interceptor binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterceptorBindingInfo {
    /// Logical bean name, or `*`.
    pub ejb_name: String,
    /// Skip class-level interceptors.
    pub exclude_class_interceptors: bool,
    /// Skip default interceptors.
    pub exclude_default_interceptors: bool,
    /// Interceptor classes.
    pub interceptors: Vec<String>,
    /// Explicit interceptor ordering.
    pub interceptor_order: Vec<String>,
    /// Target method.
    pub method: Option<NamedMethodInfo>,
}
