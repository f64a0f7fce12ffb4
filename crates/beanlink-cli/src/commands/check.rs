//! `beanlink check` — Resolve a module and report diagnostics only.

use beanlink_linker::Linker;
use beanlink_linker::diagnostics::CollectingSink;
use clap::Args;

use super::ModuleArgs;
use crate::output;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The module to check.
    #[command(flatten)]
    pub module: ModuleArgs,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the module fails to load or link.
pub fn execute(args: &CheckArgs, linker: &Linker) -> anyhow::Result<()> {
    let mut sink = CollectingSink::default();
    let result = args.module.link(linker, &mut sink);
    print!("{}", output::render_warnings(sink.warnings()));
    let plan = result?;

    println!(
        "{}: {} component(s) linked, {} warning(s)",
        plan.module_id,
        plan.components.len(),
        sink.len()
    );
    Ok(())
}
