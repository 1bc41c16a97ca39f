//! External process execution
//!
//! [`CommandRunner`] is the seam between the cloner and the operating
//! system, so tests can substitute a scripted runner.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

/// Runs one external command and reports its outcome.
pub trait CommandRunner {
    /// Run `command` (program followed by arguments).
    ///
    /// When `env` is given, the child sees exactly that environment.
    /// Returns trimmed stdout on success, [`Error::ExternalTool`] with the
    /// captured stderr on a nonzero exit.
    fn run(
        &self,
        command: &[String],
        working_dir: Option<&Path>,
        env: Option<&HashMap<String, String>>,
    ) -> Result<String>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        command: &[String],
        working_dir: Option<&Path>,
        env: Option<&HashMap<String, String>>,
    ) -> Result<String> {
        let (program, args) = command.split_first().ok_or(Error::EmptyCommand)?;
        let command_line = command.join(" ");

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        if let Some(env) = env {
            cmd.env_clear().envs(env);
        }

        tracing::debug!(command = %command_line, "Running external command");
        let output = cmd.output().map_err(|source| Error::Spawn {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ExternalTool {
                command: command_line,
                stderr: if stderr.is_empty() {
                    format!("unknown error ({})", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
