//! Init command implementation

use std::path::Path;

use colored::Colorize;
use iconsync_core::config::TEMPLATE;
use iconsync_fs::NormalizedPath;
use iconsync_fs::io::write_text;

use super::config_path;
use crate::error::{CliError, Result};

/// Write the starter config.
pub fn run_init(cwd: &Path, config: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path(cwd, config);
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    write_text(&NormalizedPath::new(&path), TEMPLATE)?;

    println!("{} Created {}", "OK".green().bold(), path.display().to_string().cyan());
    println!();
    println!("Set {} and a token, then run {}.", "remote.file_key".cyan(), "iconsync sync".cyan());
    Ok(())
}
