//! iconsync CLI
//!
//! The command-line interface for syncing exported icons from a design file.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Sync {
            force,
            dry_run,
            json,
        }) => commands::run_sync(&cwd, config, force, dry_run, json),
        Some(Commands::Status { json }) => commands::run_status(&cwd, config, json),
        Some(Commands::Init { force }) => commands::run_init(&cwd, config, force),
        None => {
            // No command provided - show help hint
            println!("{} sync icons from a design file", "iconsync".green().bold());
            println!();
            println!("Run {} for available commands.", "iconsync --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}
