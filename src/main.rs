//! `modstate` command-line entry point.
use anyhow::Result;
use clap::Parser;

use modstate_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command_name = match &args.command {
        cli::Command::Reconcile(_) => "reconcile",
        cli::Command::Status(_) => "status",
        cli::Command::Version => {
            commands::version::run();
            return Ok(());
        }
    };

    logging::init_subscriber(args.verbose, command_name);
    let log = logging::Logger::new(command_name);

    match args.command {
        cli::Command::Reconcile(opts) => commands::reconcile::run(&args.global, &opts, &log),
        cli::Command::Status(opts) => commands::status::run(&args.global, &opts, &log),
        cli::Command::Version => Ok(()),
    }
}
