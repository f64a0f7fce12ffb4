//! # beanlink-linker
//!
//! Resolves a module's declaration tree against its independently authored
//! binding tree and produces a [`plan::ResolvedPlan`].
//!
//! Handles:
//! - **Linker**: structural matching of declarations to bindings, deployment
//!   id uniqueness, and the cross-reference passes.
//! - **Builders**: one builder per bean kind (session, entity, message-driven).
//! - **Assembly**: interceptors, security roles, method permissions, method
//!   transactions, and security-role links.
//! - **Relationships**: CMR field creation and `mapped_by` cross-linking.
//! - **Environment**: the naming environment builder collaborator.
//! - **Diagnostics**: sinks receiving non-fatal warnings.
//!
//! # Example
//!
//! ```
//! use beanlink_linker::diagnostics::CollectingSink;
//! use beanlink_linker::Linker;
//! use beanlink_model::binding::{BindingTree, DeploymentBinding};
//! use beanlink_model::declaration::{BeanCommon, DeclarationTree, EnterpriseBean, SessionBean};
//!
//! let declarations = DeclarationTree {
//!     beans: vec![EnterpriseBean::Stateless(SessionBean {
//!         common: BeanCommon::named("OrderBean"),
//!         ..SessionBean::default()
//!     })],
//!     ..DeclarationTree::default()
//! };
//! let bindings = BindingTree {
//!     deployments: vec![DeploymentBinding::new("OrderBean", "OrderBean-Deployment", "StatelessContainer")],
//! };
//!
//! let mut sink = CollectingSink::default();
//! let plan = Linker::default()
//!     .resolve("apps/orders.jar", &declarations, &bindings, &mut sink)
//!     .expect("module links");
//! assert_eq!(plan.module_id, "orders");
//! assert_eq!(plan.components[0].deployment_id.as_str(), "OrderBean-Deployment");
//! ```

mod assembly;
pub mod builders;
pub mod diagnostics;
pub mod environment;
pub mod linker;
pub mod plan;
mod relationship;

pub use linker::Linker;
