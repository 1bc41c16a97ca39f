//! Repository reference to workspace directory name mapping

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::remote;

/// Suffix appended to every clone workspace directory.
pub const WORKSPACE_SUFFIX: &str = "_yaml";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Directory name for a clone workspace of `reference`.
///
/// Uses the repository short name when one can be extracted, otherwise a
/// hash of the whole reference.
/// `https://github.com/acme/widgets.git` -> `widgets_yaml`
pub fn workspace_dir_name(reference: &str) -> String {
    let base = remote::short_name(reference)
        .map(|name| sanitize(&name))
        .filter(|name| !name.is_empty() && !name.chars().all(|c| c == '.'))
        .unwrap_or_else(|| hashed_name(reference));
    format!("{base}{WORKSPACE_SUFFIX}")
}

/// Replace runs of characters outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize(name: &str) -> String {
    UNSAFE_CHARS
        .replace_all(name, "_")
        .trim_matches('_')
        .to_string()
}

fn hashed_name(reference: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(reference.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("repo-{}", &digest[..16])
}
