//! Repository URL helpers
//!
//! Normalization, SSH rewriting and owner/repo extraction for references
//! hosted on well-known git services.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Hosts whose web URLs map directly onto clonable repositories.
pub const KNOWN_GIT_HOSTS: [&str; 3] = ["github.com", "gitlab.com", "bitbucket.org"];

/// `user@host:path` (SCP-like syntax used by ssh remotes).
static SCP_LIKE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.+-]+@[\w.-]+:").unwrap());

/// `owner/repo` on a known host, over https or scp-like ssh, with optional
/// `.git` suffix and deeper path segments.
static FULL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[@/.])(?:github\.com|gitlab\.com|bitbucket\.org)[:/]([^/\s:]+)/([^/\s?#]+?)(?:\.git)?(?:[/?#].*)?$",
    )
    .unwrap()
});

/// Check whether a host is, or is a subdomain of, a known git host.
pub fn is_known_git_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    KNOWN_GIT_HOSTS.iter().any(|known| {
        host == *known
            || host
                .strip_suffix(known)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Check for `ssh://` or `user@host:path` references.
pub fn is_ssh_url(reference: &str) -> bool {
    reference.starts_with("ssh://") || SCP_LIKE_PATTERN.is_match(reference)
}

/// Lowercase and strip a trailing `.git`, for comparing references.
///
/// The result is not meant to be cloned from.
pub fn normalize_repo_url(repo_url: &str) -> String {
    let lowered = repo_url.to_lowercase();
    match lowered.strip_suffix(".git") {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}

/// Rewrite an HTTP(S) URL on a known git host into `git@host:owner/repo.git`.
///
/// Anything else, including references that already use ssh, is returned
/// unchanged.
pub fn to_ssh_url(repo_url: &str) -> String {
    if is_ssh_url(repo_url) {
        return repo_url.to_string();
    }

    let Ok(parsed) = Url::parse(repo_url) else {
        return repo_url.to_string();
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return repo_url.to_string();
    }
    let Some(host) = parsed.host_str().map(str::to_ascii_lowercase) else {
        return repo_url.to_string();
    };

    let path = parsed.path().trim_matches('/');
    if path.is_empty() || !is_known_git_host(&host) {
        return repo_url.to_string();
    }

    let path = path.strip_suffix(".git").unwrap_or(path);
    format!("git@{host}:{path}.git")
}

/// Extract `owner/repo` from a reference on a known git host.
pub fn repo_full_name(reference: &str) -> Option<String> {
    let captures = FULL_NAME_PATTERN.captures(reference)?;
    Some(format!("{}/{}", &captures[1], &captures[2]))
}

/// Extract just the repository name from a reference on a known git host.
pub fn repo_name(reference: &str) -> Option<String> {
    repo_full_name(reference)?
        .rsplit('/')
        .next()
        .map(str::to_string)
}

/// Best-effort short name for any reference, including local paths and
/// self-hosted remotes: the last path segment without `.git`.
pub fn short_name(reference: &str) -> Option<String> {
    if let Some(name) = repo_name(reference) {
        return Some(name);
    }

    let trimmed = reference.trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\', ':']).next()?;
    let last = last.strip_suffix(".git").unwrap_or(last);
    if last.is_empty() || last == "." || last == ".." {
        None
    } else {
        Some(last.to_string())
    }
}
