//! Environment construction for the clone subprocess

use std::collections::HashMap;
use std::path::Path;

/// Variable read by git to override the ssh command line.
pub const GIT_SSH_COMMAND: &str = "GIT_SSH_COMMAND";

/// Build the environment for a clone subprocess.
///
/// - With an SSH key: the ambient environment plus a `GIT_SSH_COMMAND` that
///   pins that identity and accepts unknown host keys on first connection
///   (`StrictHostKeyChecking=accept-new`, trust on first use).
/// - Without a key but with `use_ssh`: an unchanged copy of the ambient
///   environment, leaving ssh-agent and ssh config in charge.
/// - Otherwise `None`: the child inherits the default environment.
pub fn build_git_env(use_ssh: bool, ssh_key: Option<&Path>) -> Option<HashMap<String, String>> {
    if let Some(key) = ssh_key {
        let mut env = ambient_env();
        env.insert(GIT_SSH_COMMAND.to_string(), ssh_command(key));
        return Some(env);
    }

    if use_ssh {
        return Some(ambient_env());
    }

    None
}

/// Unicode-clean copy of the process environment.
fn ambient_env() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

fn ssh_command(key: &Path) -> String {
    let key = key.display().to_string();
    let key = if key.chars().any(char::is_whitespace) {
        format!("\"{key}\"")
    } else {
        key
    };
    format!("ssh -i {key} -o IdentitiesOnly=yes -o StrictHostKeyChecking=accept-new")
}
