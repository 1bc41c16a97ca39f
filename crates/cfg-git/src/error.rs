//! Error types for cfg-git

use std::path::PathBuf;

/// Result type for cfg-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cfg-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran and exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    ExternalTool { command: String, stderr: String },

    #[error("Empty command line")]
    EmptyCommand,

    #[error("Failed to remove {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
