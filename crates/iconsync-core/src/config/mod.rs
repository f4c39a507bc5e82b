//! Sync configuration
//!
//! [`SyncConfig`] is loaded once per run from `iconsync.toml` (or any format
//! [`ConfigStore`] understands) and then passed by reference, read-only, into
//! every component that needs it.

use std::path::PathBuf;

use iconsync_fs::{ConfigStore, NormalizedPath};
use iconsync_remote::SvgOptions;
use iconsync_remote::figma::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "iconsync.toml";

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV: &str = "FIGMA_TOKEN";

/// Current-format inventory file, relative to the output directory.
pub const INVENTORY_FILE: &str = "_inventory.json";

/// Legacy inventory file, relative to the output directory.
pub const LEGACY_INVENTORY_FILE: &str = ".icons.json";

/// Starter configuration written by `iconsync init`.
pub const TEMPLATE: &str = r#"# iconsync configuration

# Directory assets are written to
output_dir = "icons"

# "nested" keeps `/` in asset names as subdirectories,
# "flat" joins the segments with `_`
naming = "nested"

extension = "svg"

[remote]
file_key = ""
# token = ""        # falls back to the FIGMA_TOKEN environment variable
# pages = ["Icons"] # restrict to these pages

[optimize]
enabled = true
strip_comments = true
monochrome = false
"#;

fn default_output_dir() -> PathBuf {
    PathBuf::from("icons")
}

fn default_extension() -> String {
    "svg".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_true() -> bool {
    true
}

/// How `/` in asset names maps onto the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// `arrows/left` -> `arrows/left.svg`
    #[default]
    Nested,
    /// `arrows/left` -> `arrows_left.svg`
    Flat,
}

/// Remote design-file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSection {
    /// Key of the design file to export from.
    #[serde(default)]
    pub file_key: String,

    /// API token. Falls back to [`TOKEN_ENV`].
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Page names to include. Empty means every page.
    #[serde(default)]
    pub pages: Vec<String>,
}

/// Post-processing settings for exported SVGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizeSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub strip_comments: bool,

    #[serde(default)]
    pub monochrome: bool,
}

impl Default for OptimizeSection {
    fn default() -> Self {
        Self {
            enabled: true,
            strip_comments: true,
            monochrome: false,
        }
    }
}

impl OptimizeSection {
    /// Processor options, or `None` when optimization is disabled.
    pub fn svg_options(&self) -> Option<SvgOptions> {
        self.enabled.then_some(SvgOptions {
            strip_comments: self.strip_comments,
            monochrome: self.monochrome,
        })
    }
}

/// Immutable configuration for one sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub naming: NamingPolicy,

    /// File extension for written assets, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub remote: RemoteSection,

    #[serde(default)]
    pub optimize: OptimizeSection,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            naming: NamingPolicy::default(),
            extension: default_extension(),
            remote: RemoteSection {
                api_base: default_api_base(),
                ..RemoteSection::default()
            },
            optimize: OptimizeSection::default(),
        }
    }
}

impl SyncConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist and
    /// [`Error::InvalidConfig`] if it cannot be parsed or fails validation.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }
        let config: SyncConfig = ConfigStore::new().load(path).map_err(|e| match e {
            iconsync_fs::Error::ConfigParse { message, .. } => Error::InvalidConfig { message },
            other => Error::Fs(other),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML config content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SyncConfig = ConfigStore::new()
            .parse(&NormalizedPath::new(CONFIG_FILE), content)
            .map_err(|e| match e {
                iconsync_fs::Error::ConfigParse { message, .. } => Error::InvalidConfig { message },
                other => Error::Fs(other),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        let ext = self.extension.trim_start_matches('.');
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(Error::InvalidConfig {
                message: format!("extension {:?} is not a valid file extension", self.extension),
            });
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig {
                message: "output_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the file key and API token needed to reach the remote.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for an empty file key and
    /// [`Error::MissingCredential`] when no token is configured or exported.
    pub fn remote_credentials(&self) -> Result<(String, String)> {
        if self.remote.file_key.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "remote.file_key is required".to_string(),
            });
        }
        let token = self
            .remote
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty()))
            .ok_or_else(|| Error::MissingCredential {
                key: "remote.token".to_string(),
                env: TOKEN_ENV.to_string(),
            })?;
        Ok((self.remote.file_key.clone(), token))
    }

    /// Path, relative to the output directory, of the file for asset `name`.
    pub fn file_path(&self, name: &str) -> NormalizedPath {
        let ext = self.extension.trim_start_matches('.');
        let stem = match self.naming {
            NamingPolicy::Nested => name.to_string(),
            NamingPolicy::Flat => name
                .split('/')
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("_"),
        };
        NormalizedPath::new(format!("{stem}.{ext}"))
    }

    /// Display form of [`SyncConfig::file_path`].
    pub fn file_name(&self, name: &str) -> String {
        self.file_path(name).to_string()
    }

    pub fn inventory_path(&self) -> NormalizedPath {
        NormalizedPath::new(INVENTORY_FILE)
    }

    pub fn legacy_inventory_path(&self) -> NormalizedPath {
        NormalizedPath::new(LEGACY_INVENTORY_FILE)
    }
}
