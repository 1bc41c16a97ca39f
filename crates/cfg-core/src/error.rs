//! Error types for cfg-core

use std::path::PathBuf;

/// Result type for cfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cfg-core operations
///
/// Resolution itself reports absence rather than errors; these surface from
/// construction, settings, and the individual strategy steps.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport, status, or decoding failure
    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Fetched content is YAML but not a mapping
    #[error("Document at {url} is not a mapping")]
    NotAMapping { url: String },

    /// Clone workspace could not be prepared
    #[error("Workspace error at {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Environment or builder setting has an unusable value
    #[error("Invalid setting {name}={value}: {message}")]
    InvalidSetting {
        name: String,
        value: String,
        message: String,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from cfg-fs
    #[error(transparent)]
    Fs(#[from] cfg_fs::Error),

    /// Git error from cfg-git
    #[error(transparent)]
    Git(#[from] cfg_git::Error),
}
