//! Error types for iconsync-remote

/// Result type for iconsync-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the remote design source.
///
/// All of these are fatal to a sync run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API returned a payload we could not interpret.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// No export URL was produced for a requested node.
    #[error("no export available for node {id}")]
    MissingExport { id: String },

    /// Exported content could not be post-processed.
    #[error("invalid content for node {id}: {message}")]
    InvalidContent { id: String, message: String },
}
