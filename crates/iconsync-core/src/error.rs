//! Error types for iconsync-core
//!
//! Everything here is fatal to a run. Naming collisions and other advisory
//! conditions are reported as [`crate::NotificationEvent`]s instead.

use std::path::PathBuf;

/// Result type for iconsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in iconsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A required credential was neither configured nor in the environment
    #[error("Missing credential: set `{key}` in the config or the {env} environment variable")]
    MissingCredential { key: String, env: String },

    /// The current-format inventory exists but cannot be parsed
    #[error("Inventory at {path} is corrupt: {message}")]
    InventoryCorrupt { path: String, message: String },

    /// No bytes were available for an item that has to be written
    #[error("No content available for asset {identifier}")]
    ContentMissing { identifier: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from iconsync-fs
    #[error(transparent)]
    Fs(#[from] iconsync_fs::Error),

    /// Remote source error from iconsync-remote
    #[error(transparent)]
    Remote(#[from] iconsync_remote::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
