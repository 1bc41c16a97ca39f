//! Error types for cfg-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from cfg-core
    #[error(transparent)]
    Core(#[from] cfg_core::Error),

    /// Error from cfg-fs
    #[error(transparent)]
    Fs(#[from] cfg_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML rendering error
    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON rendering error
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing could be resolved from the locator
    #[error("No configuration found at '{locator}'")]
    NotFound { locator: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
