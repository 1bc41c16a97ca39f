//! Locator classification
//!
//! A locator is the single string a caller hands the resolver. It is
//! classified once, up front, and the resolver routes on the result.

use std::fmt;
use std::path::{Path, PathBuf};

use cfg_git::remote::is_ssh_url;
use url::Url;

/// A classified configuration locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// `ssh://...` or `user@host:path`
    Ssh(String),
    /// `http://` or `https://` URL with a host
    Http(Url),
    /// Any other remote git reference (`git://`, `file://`, `host:path`)
    Remote(String),
    /// Filesystem path, relative or absolute
    Local(PathBuf),
}

impl Locator {
    /// Classify a raw locator string. Returns `None` for an empty locator.
    pub fn classify(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if is_ssh_url(raw) {
            return Some(Self::Ssh(raw.to_string()));
        }

        if let Ok(url) = Url::parse(raw) {
            match url.scheme() {
                "http" | "https" if url.host_str().is_some() => return Some(Self::Http(url)),
                // Single-letter schemes are Windows drive letters.
                scheme if scheme.len() > 1 => return Some(Self::Remote(raw.to_string())),
                _ => {}
            }
        }

        if looks_like_host_path(raw) {
            return Some(Self::Remote(raw.to_string()));
        }

        Some(Self::Local(PathBuf::from(raw)))
    }

    /// The locator as the caller wrote it (URLs in normalized form).
    pub fn as_str(&self) -> String {
        match self {
            Self::Ssh(s) | Self::Remote(s) => s.clone(),
            Self::Http(url) => url.to_string(),
            Self::Local(path) => path.display().to_string(),
        }
    }

    /// Local path, if this locator names one.
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh(_) => write!(f, "ssh:{}", self.as_str()),
            Self::Http(_) => write!(f, "http:{}", self.as_str()),
            Self::Remote(_) => write!(f, "remote:{}", self.as_str()),
            Self::Local(_) => write!(f, "local:{}", self.as_str()),
        }
    }
}

/// `host:path` where the colon comes before any slash, e.g. `gitserver:team/repo`.
fn looks_like_host_path(raw: &str) -> bool {
    let Some(colon) = raw.find(':') else {
        return false;
    };
    let host = &raw[..colon];
    if host.len() < 2 || raw[colon + 1..].is_empty() {
        return false;
    }
    !host.contains(['/', '\\'])
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}
