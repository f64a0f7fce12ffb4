//! CLI command definitions and dispatch.

pub mod check;
pub mod plan;

use std::path::{Path, PathBuf};

use anyhow::Context;
use beanlink_common::config::LinkerConfig;
use beanlink_linker::Linker;
use beanlink_linker::diagnostics::DiagnosticsSink;
use beanlink_linker::plan::ResolvedPlan;
use beanlink_model::load;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// beanlink — link bean declarations to their deployment bindings.
#[derive(Parser, Debug)]
#[command(name = "beanlink", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Linker configuration file (JSON or YAML).
    #[arg(long, global = true, env = "BEANLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Format of log output on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a module and print its deployment plan.
    Plan(plan::PlanArgs),
    /// Resolve a module and report diagnostics only.
    Check(check::CheckArgs),
}

/// The two documents describing one module.
#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Bean declaration document.
    pub declarations: PathBuf,

    /// Deployment binding document.
    pub bindings: PathBuf,

    /// Module path recorded in the plan. Defaults to the declarations path.
    #[arg(long)]
    pub module: Option<String>,
}

impl ModuleArgs {
    /// Module path used in messages and as the plan's codebase.
    pub fn module_path(&self) -> String {
        self.module
            .clone()
            .unwrap_or_else(|| self.declarations.display().to_string())
    }

    /// Loads both documents and resolves them with `linker`.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be loaded or the module does
    /// not link.
    pub fn link(
        &self,
        linker: &Linker,
        sink: &mut dyn DiagnosticsSink,
    ) -> anyhow::Result<ResolvedPlan> {
        tracing::debug!(
            declarations = %self.declarations.display(),
            bindings = %self.bindings.display(),
            "loading module documents"
        );
        let declarations = load::load_declarations(&self.declarations).with_context(|| {
            format!("failed to load declarations from {}", self.declarations.display())
        })?;
        let bindings = load::load_bindings(&self.bindings).with_context(|| {
            format!("failed to load bindings from {}", self.bindings.display())
        })?;
        let plan = linker.resolve(&self.module_path(), &declarations, &bindings, sink)?;
        Ok(plan)
    }
}

/// Builds a linker from the optional configuration file.
///
/// # Errors
///
/// Returns an error if the configuration file is unreadable or invalid.
pub fn linker(config: Option<&Path>) -> anyhow::Result<Linker> {
    let config = match config {
        Some(path) => LinkerConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => LinkerConfig::default(),
    };
    Ok(Linker::new(config))
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let linker = linker(cli.config.as_deref())?;
    match cli.command {
        Command::Plan(args) => plan::execute(&args, &linker),
        Command::Check(args) => check::execute(&args, &linker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_path_defaults_to_declarations() {
        let cli = Cli::try_parse_from(["beanlink", "check", "shop/ejb-jar.yaml", "shop/openejb-jar.json"])
            .expect("parses");
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.module.module_path(), "shop/ejb-jar.yaml");
    }

    #[test]
    fn module_flag_overrides_path() {
        let cli = Cli::try_parse_from([
            "beanlink",
            "plan",
            "d.yaml",
            "b.yaml",
            "--module",
            "apps/shop.jar",
            "--format",
            "json",
        ])
        .expect("parses");
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.module.module_path(), "apps/shop.jar");
        assert_eq!(args.format, plan::OutputFormat::Json);
    }

    #[test]
    fn global_options_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "beanlink",
            "check",
            "d.yaml",
            "b.yaml",
            "--log-format",
            "json",
            "--config",
            "beanlink.yaml",
        ])
        .expect("parses");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("beanlink.yaml")));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = linker(Some(Path::new("/nonexistent/beanlink.yaml"))).expect_err("no file");
        assert!(err.to_string().contains("failed to load configuration"));
    }
}
