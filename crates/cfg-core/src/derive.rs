//! URL derivation
//!
//! Rewrites web URLs into the forms the strategies need: a raw-content URL
//! for direct fetches, a clonable `.git` URL for the clone fallback, and the
//! repository-relative file a clone should read.

use cfg_fs::{DEFAULT_CONFIG_FILE, has_yaml_extension};
use cfg_git::remote::is_known_git_host;
use url::Url;

use crate::locator::Locator;

/// Host serving raw file contents for github.com repositories.
pub const GITHUB_RAW_HOST: &str = "raw.githubusercontent.com";

/// Non-empty path segments of a URL.
fn segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn host(url: &Url) -> Option<String> {
    url.host_str().map(str::to_ascii_lowercase)
}

/// Derive a clonable repository URL from an HTTP(S) URL.
///
/// `https://github.com/acme/widgets/blob/main/init.yaml` ->
/// `https://github.com/acme/widgets.git`
pub fn derive_clone_url(url: &Url) -> Option<String> {
    if url.path().ends_with(".git") {
        return Some(url.to_string());
    }

    let host = host(url)?;
    let clone_host = if host == GITHUB_RAW_HOST {
        "github.com"
    } else if is_known_git_host(&host) {
        host.as_str()
    } else {
        tracing::debug!(url = %url, "No clone URL for unknown host");
        return None;
    };

    let segments = segments(url);
    let [owner, repo, ..] = segments.as_slice() else {
        return None;
    };
    let repo = repo.strip_suffix(".git").unwrap_or(*repo);
    Some(format!("https://{clone_host}/{owner}/{repo}.git"))
}

/// URL to GET for a direct fetch.
///
/// GitHub `blob` pages are rewritten to their raw-content form; anything
/// else is fetched as given.
pub fn direct_fetch_url(url: &Url) -> Url {
    if host(url).as_deref() != Some("github.com") {
        return url.clone();
    }

    match segments(url).as_slice() {
        [owner, repo, "blob", reference, rest @ ..] if !rest.is_empty() => {
            let raw = format!(
                "https://{GITHUB_RAW_HOST}/{owner}/{repo}/{reference}/{}",
                rest.join("/")
            );
            Url::parse(&raw).unwrap_or_else(|_| url.clone())
        }
        _ => url.clone(),
    }
}

/// URL of `target` inside the repository a root URL points at.
///
/// `https://github.com/<o>/<r>` becomes
/// `https://raw.githubusercontent.com/<o>/<r>/<branch>/<target>`; any other
/// host gets the target appended to the URL with `.git` dropped. `None` when
/// the URL already names a file or is a deeper GitHub page.
pub fn repository_file_url(url: &Url, target: &str, branch: &str) -> Option<Url> {
    let target = target.trim().trim_start_matches('/');
    if target.is_empty() || names_file(url) {
        return None;
    }

    let raw = match (host(url).as_deref(), segments(url).as_slice()) {
        (Some("github.com"), [owner, repo]) => {
            let repo = repo.strip_suffix(".git").unwrap_or(*repo);
            format!("https://{GITHUB_RAW_HOST}/{owner}/{repo}/{branch}/{target}")
        }
        (Some("github.com"), _) => return None,
        _ => {
            let mut base = url.clone();
            base.set_query(None);
            base.set_fragment(None);
            let base = base.as_str().trim_end_matches('/');
            let base = base.strip_suffix(".git").unwrap_or(base);
            format!("{base}/{target}")
        }
    };
    Url::parse(&raw).ok()
}

/// Whether the URL points at a YAML file rather than a repository.
fn names_file(url: &Url) -> bool {
    repo_relative_path(url).is_some()
        || segments(url).last().is_some_and(|last| has_yaml_extension(last))
}

/// Repository-relative path of the file a file-within-repo URL points at.
///
/// Branch names containing `/` are not recognized; the first segment after
/// the view keyword is taken as the ref.
pub fn repo_relative_path(url: &Url) -> Option<String> {
    let host = host(url)?;
    let segments = segments(url);

    let rest: &[&str] = match (host.as_str(), segments.as_slice()) {
        ("github.com", [_, _, "blob" | "tree" | "raw", _, rest @ ..]) => rest,
        ("gitlab.com", [_, _, "-", "blob" | "raw", _, rest @ ..]) => rest,
        (GITHUB_RAW_HOST, [_, _, _, rest @ ..]) => rest,
        _ => return None,
    };

    let last = rest.last()?;
    has_yaml_extension(last).then(|| rest.join("/"))
}

/// Pick the file to read out of a cloned repository.
///
/// In order: the explicit target, the repository-relative path of a
/// file-within-repo URL, the locator's last segment when it looks like YAML,
/// then `init.yaml`. A leading `/` is dropped.
pub fn resolve_target_file(explicit: Option<&str>, locator: &Locator) -> String {
    if let Some(target) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return target.trim_start_matches('/').to_string();
    }

    if let Locator::Http(url) = locator {
        if let Some(path) = repo_relative_path(url) {
            return path;
        }
    }

    let raw = match locator {
        Locator::Http(url) => url.path().to_string(),
        other => other.as_str(),
    };
    let last = raw
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or_default();
    if has_yaml_extension(last) {
        return last.to_string();
    }

    DEFAULT_CONFIG_FILE.to_string()
}
