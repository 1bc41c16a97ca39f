//! Resolver settings
//!
//! Settings come from the environment ([`SourceSettings::from_env`]) or are
//! built up in code. The CLI maps its flags onto the same fields.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use cfg_git::{CloneOptions, build_git_env};

use crate::{Error, Result};

/// Path to an SSH identity file used for clones.
pub const ENV_SSH_KEY: &str = "CFGSRC_SSH_KEY";
/// Clone over SSH using the ambient agent/config (`1`, `true`, `yes`, `on`).
pub const ENV_USE_SSH: &str = "CFGSRC_USE_SSH";
/// Git executable to run.
pub const ENV_GIT: &str = "CFGSRC_GIT";
/// Timeout for direct HTTP fetches, in whole seconds.
pub const ENV_HTTP_TIMEOUT: &str = "CFGSRC_HTTP_TIMEOUT_SECS";

/// Settings shared by every resolution a resolver performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// Git executable (default `git`)
    pub git_program: String,
    /// SSH identity file passed through `GIT_SSH_COMMAND`
    pub ssh_key: Option<PathBuf>,
    /// Hand the ambient environment to git for SSH even without a key
    pub use_ssh: bool,
    /// Request timeout for direct fetches; `None` waits indefinitely
    pub http_timeout: Option<Duration>,
    /// Extra arguments placed after `git clone`
    pub clone_args: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            ssh_key: None,
            use_ssh: false,
            http_timeout: None,
            clone_args: Vec::new(),
        }
    }
}

impl SourceSettings {
    /// Read settings from `CFGSRC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(program) = lookup(ENV_GIT).filter(|v| !v.trim().is_empty()) {
            settings.git_program = program.trim().to_string();
        }
        if let Some(key) = lookup(ENV_SSH_KEY).filter(|v| !v.trim().is_empty()) {
            settings.ssh_key = Some(PathBuf::from(key.trim()));
        }
        if let Some(flag) = lookup(ENV_USE_SSH) {
            settings.use_ssh = parse_flag(ENV_USE_SSH, &flag)?;
        }
        if let Some(secs) = lookup(ENV_HTTP_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            let parsed = secs.trim().parse::<u64>().map_err(|e| Error::InvalidSetting {
                name: ENV_HTTP_TIMEOUT.to_string(),
                value: secs.clone(),
                message: e.to_string(),
            })?;
            settings.http_timeout = Some(Duration::from_secs(parsed));
        }

        tracing::debug!(?settings, "Loaded source settings");
        Ok(settings)
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    pub fn with_ssh_key(mut self, key: Option<PathBuf>) -> Self {
        self.ssh_key = key;
        self
    }

    pub fn with_use_ssh(mut self, use_ssh: bool) -> Self {
        self.use_ssh = use_ssh;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_clone_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clone_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Environment for the clone subprocess, if it needs one.
    pub fn git_env(&self) -> Option<HashMap<String, String>> {
        build_git_env(self.use_ssh, self.ssh_key.as_deref())
    }

    /// Clone options for a resolution: history stripped, settings applied.
    pub fn clone_options(&self) -> CloneOptions {
        CloneOptions::default()
            .with_extra_args(self.clone_args.iter().cloned())
            .with_env(self.git_env())
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
            message: "expected a boolean".to_string(),
        }),
    }
}
