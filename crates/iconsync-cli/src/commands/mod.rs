//! Command implementations for iconsync-cli

pub mod init;
pub mod status;
pub mod sync;

pub use init::run_init;
pub use status::run_status;
pub use sync::run_sync;

use std::path::{Path, PathBuf};

use iconsync_core::SyncConfig;
use iconsync_core::config::CONFIG_FILE;
use iconsync_fs::{DiskStore, NormalizedPath};

use crate::error::{CliError, Result};

/// A loaded config together with where it came from.
pub struct Project {
    pub config_path: PathBuf,
    pub config: SyncConfig,
}

impl Project {
    /// Load the config at `config` or `<cwd>/iconsync.toml`.
    pub fn load(cwd: &Path, config: Option<&Path>) -> Result<Self> {
        let config_path = config_path(cwd, config);
        let config = SyncConfig::load(&NormalizedPath::new(&config_path)).map_err(|e| match e {
            iconsync_core::Error::ConfigNotFound { path } => CliError::user(format!(
                "no config found at {} (run `iconsync init` to create one)",
                path.display()
            )),
            other => other.into(),
        })?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(Self {
            config_path,
            config,
        })
    }

    /// Output directory; relative paths are taken from the config file's directory.
    pub fn output_dir(&self) -> PathBuf {
        if self.config.output_dir.is_absolute() {
            return self.config.output_dir.clone();
        }
        self.config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.config.output_dir)
    }

    pub fn store(&self) -> DiskStore {
        DiskStore::new(self.output_dir())
    }
}

/// Resolve the config file location.
pub fn config_path(cwd: &Path, config: Option<&Path>) -> PathBuf {
    match config {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd.join(CONFIG_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_output_dir_follows_config_file() {
        let project = Project {
            config_path: PathBuf::from("/work/design/iconsync.toml"),
            config: SyncConfig::default(),
        };
        assert_eq!(project.output_dir(), PathBuf::from("/work/design/icons"));
    }

    #[test]
    fn explicit_config_is_relative_to_cwd() {
        let path = config_path(Path::new("/work"), Some(Path::new("cfg/icons.toml")));
        assert_eq!(path, PathBuf::from("/work/cfg/icons.toml"));
        assert_eq!(
            config_path(Path::new("/work"), None),
            PathBuf::from("/work/iconsync.toml")
        );
    }
}
