//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// iconsync - Keep a directory of exported icons in step with a design file
#[derive(Parser, Debug)]
#[command(name = "iconsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ./iconsync.toml)
    #[arg(short, long, global = true, env = "ICONSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile the output directory with the design file
    ///
    /// Only new, changed and missing assets are downloaded. Renamed assets
    /// are written under both names; nothing is ever deleted.
    ///
    /// Examples:
    ///   iconsync sync                # Normal run
    ///   iconsync sync --dry-run      # Show what would change
    ///   iconsync sync --force        # Re-download everything
    Sync {
        /// Ignore local history and treat every asset as new
        #[arg(long)]
        force: bool,

        /// Preview changes without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what the local inventory knows, without contacting the remote
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a starter iconsync.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
