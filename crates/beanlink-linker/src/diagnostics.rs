//! Sinks for non-fatal diagnostics.
//!
//! The linker never changes control flow because of a warning; it hands the
//! message key and its positional arguments to a [`DiagnosticsSink`] and
//! carries on.

use beanlink_common::messages;
use serde::Serialize;

/// Receives non-fatal warnings raised during resolution.
pub trait DiagnosticsSink {
    /// Records a warning identified by a catalogue `key`.
    fn warning(&mut self, key: &'static str, args: Vec<String>);
}

/// A recorded warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Message catalogue key.
    pub key: &'static str,
    /// Positional arguments.
    pub args: Vec<String>,
}

impl Warning {
    /// Renders the warning through the message catalogue.
    #[must_use]
    pub fn message(&self) -> String {
        messages::format(self.key, &self.args)
    }
}

/// Keeps every warning in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Vec<Warning>,
}

impl CollectingSink {
    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consumes the sink, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Number of recorded warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Counts the warnings recorded under `key`.
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.warnings.iter().filter(|w| w.key == key).count()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn warning(&mut self, key: &'static str, args: Vec<String>) {
        self.warnings.push(Warning { key, args });
    }
}

/// Forwards each warning as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn warning(&mut self, key: &'static str, args: Vec<String>) {
        tracing::warn!(key, "{}", messages::format(key, &args));
    }
}
