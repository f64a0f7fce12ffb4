//! # beanlink-common
//!
//! Shared error definitions, identifier types, message catalogue,
//! configuration models, and constants used across the beanlink workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives that the model, linker and
//! CLI crates build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod types;
