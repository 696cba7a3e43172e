//! Command-line interface definitions.
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for the module state reconciler.
#[derive(Parser, Debug)]
#[command(
    name = "modstate",
    about = "Reconcile enabled/disabled module state in a project's configuration",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Project root directory (defaults to MODSTATE_ROOT or the current directory)
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Report decisions without writing them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide and persist the state of each module
    Reconcile(ModuleArgs),
    /// Show the recorded state of each module without changing anything
    Status(ModuleArgs),
    /// Print version information
    Version,
}

/// Module selection shared by `reconcile` and `status`.
#[derive(Args, Debug, Clone)]
pub struct ModuleArgs {
    /// Module names, processed in the order given
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub modules: Vec<String>,

    /// TOML file with a `modules = [...]` list, processed after positional names
    #[arg(long, value_name = "FILE")]
    pub modules_file: Option<std::path::PathBuf>,
}
