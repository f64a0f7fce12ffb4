//! `beanlink plan` — Resolve a module and print its deployment plan.

use beanlink_linker::Linker;
use beanlink_linker::diagnostics::CollectingSink;
use clap::{Args, ValueEnum};

use super::ModuleArgs;
use crate::output;

/// Plan output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// The full plan as pretty-printed JSON.
    Json,
}

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// The module to resolve.
    #[command(flatten)]
    pub module: ModuleArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Executes the `plan` command.
///
/// Prints the plan to stdout and the collected warnings to stderr.
///
/// # Errors
///
/// Returns an error if loading or resolution fails, or the plan cannot be
/// serialized.
pub fn execute(args: &PlanArgs, linker: &Linker) -> anyhow::Result<()> {
    let mut sink = CollectingSink::default();
    let result = args.module.link(linker, &mut sink);
    report_warnings(&sink);
    let plan = result?;

    match args.format {
        OutputFormat::Text => print!("{}", output::render_plan(&plan, linker.config())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}

#[allow(clippy::print_stderr)]
fn report_warnings(sink: &CollectingSink) {
    if !sink.is_empty() {
        eprint!("{}", output::render_warnings(sink.warnings()));
    }
}
