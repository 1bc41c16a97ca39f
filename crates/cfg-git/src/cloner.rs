//! Repository cloning through the `git` executable

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::process::{CommandRunner, SystemRunner};
use crate::{Error, Result};

/// Name of the version-control metadata directory removed by history stripping.
pub const GIT_DIR: &str = ".git";

/// Options for a single clone.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Delete `.git` after a successful clone, leaving only the working tree.
    pub strip_history: bool,
    /// Arguments inserted between `clone` and the repository reference.
    pub extra_args: Vec<String>,
    /// Full environment for the subprocess; `None` inherits the caller's.
    pub env: Option<HashMap<String, String>>,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            strip_history: true,
            extra_args: Vec::new(),
            env: None,
        }
    }
}

impl CloneOptions {
    pub fn keep_history(mut self) -> Self {
        self.strip_history = false;
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, env: Option<HashMap<String, String>>) -> Self {
        self.env = env;
        self
    }
}

/// Clones repositories and optionally strips their history.
///
/// The cloner can be shared between resolutions. The only state it keeps is
/// the error text of the most recent failed clone, for diagnostics.
#[derive(Debug)]
pub struct RepoCloner<R = SystemRunner> {
    runner: R,
    program: String,
    last_error: Mutex<Option<String>>,
}

impl Default for RepoCloner<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoCloner<SystemRunner> {
    /// Create a cloner that runs the `git` found on `PATH`.
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl<R: CommandRunner> RepoCloner<R> {
    /// Create a cloner around a custom command runner.
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            program: "git".to_string(),
            last_error: Mutex::new(None),
        }
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Error text from the most recent failed clone, if the last clone failed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record_error(&self, message: Option<String>) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = message;
    }

    /// Clone `repo_url` into `destination`.
    ///
    /// Runs `git clone <extra_args…> <repo_url> <destination>`, then removes
    /// `<destination>/.git` when `strip_history` is set.
    pub fn try_clone(&self, destination: &Path, repo_url: &str, options: &CloneOptions) -> Result<()> {
        let mut command = vec![self.program.clone(), "clone".to_string()];
        command.extend(options.extra_args.iter().cloned());
        command.push(repo_url.to_string());
        command.push(destination.display().to_string());

        self.runner.run(&command, None, options.env.as_ref())?;

        if options.strip_history {
            remove_git_history(destination)?;
        }
        Ok(())
    }

    /// Clone like [`try_clone`](Self::try_clone), reporting only success.
    ///
    /// On failure the captured error text is logged and kept in
    /// [`last_error`](Self::last_error); nothing is raised.
    pub fn clone_repo(&self, destination: &Path, repo_url: &str, options: &CloneOptions) -> bool {
        self.record_error(None);
        tracing::info!(repo = %repo_url, "Cloning repository");

        match self.try_clone(destination, repo_url, options) {
            Ok(()) => {
                tracing::info!(
                    repo = %repo_url,
                    path = %destination.display(),
                    "Repository cloned"
                );
                true
            }
            Err(e) => {
                let message = match e {
                    Error::ExternalTool { stderr, .. } => stderr,
                    other => other.to_string(),
                };
                tracing::warn!(repo = %repo_url, error = %message, "Failed to clone repository");
                self.record_error(Some(message));
                false
            }
        }
    }
}

/// Delete the `.git` directory under `destination`. Absent is fine.
pub fn remove_git_history(destination: &Path) -> Result<()> {
    let git_dir = destination.join(GIT_DIR);
    if !git_dir.exists() {
        return Ok(());
    }
    std::fs::remove_dir_all(&git_dir).map_err(|source| Error::Cleanup {
        path: git_dir,
        source,
    })
}
