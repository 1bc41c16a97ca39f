//! Error types for cfg-fs

use std::path::PathBuf;

/// Result type for cfg-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cfg-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly named configuration file is missing or unreadable.
    #[error("Configuration file '{path}' not found or invalid: {reason}")]
    ConfigNotFound { path: PathBuf, reason: String },

    #[error("Failed to parse YAML from {origin}: {message}")]
    ConfigParse { origin: String, message: String },

    #[error("Failed to serialize YAML for {path}: {message}")]
    ConfigSerialize { path: PathBuf, message: String },

    #[error("No save target: document has no origin and no path was given")]
    MissingSaveTarget,

    #[error("Cannot save to remote origin {origin}")]
    RemoteOrigin { origin: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
