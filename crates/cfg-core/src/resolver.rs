//! Source resolution
//!
//! [`plan`] decides how a locator is retrieved; [`SourceResolver::resolve`]
//! carries the plan out, falling back from a direct fetch to a clone when
//! allowed, and always cleaning up the clone workspace.
//!
//! Resolution never fails loudly: every retrieval problem is logged and
//! reported as `None`.

use std::path::{Path, PathBuf};

use cfg_fs::{ConfigDocument, read_yaml};
use cfg_git::{CommandRunner, RepoCloner, SystemRunner};
use url::Url;

use crate::Result;
use crate::derive::{derive_clone_url, direct_fetch_url, repository_file_url, resolve_target_file};
use crate::fetch::{HttpFetcher, ReqwestFetcher, fetch_document};
use crate::locator::Locator;
use crate::settings::SourceSettings;
use crate::workspace::ClonedWorkspace;

/// Branch read by direct fetches of a repository file.
pub const DEFAULT_BRANCH: &str = "main";

/// One resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Local path, HTTP(S) URL, or git repository reference
    pub locator: String,
    /// File to read from a cloned repository; inferred when `None`
    pub target_file: Option<String>,
    /// Branch used when a direct fetch builds a repository file URL
    pub branch: String,
    /// Clone the repository when the locator cannot be read directly
    pub allow_clone_fallback: bool,
    /// Directory to nest clone workspaces in; a private temp dir when `None`
    pub workspace_root: Option<PathBuf>,
}

impl ResolveRequest {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            target_file: None,
            branch: DEFAULT_BRANCH.to_string(),
            allow_clone_fallback: true,
            workspace_root: None,
        }
    }

    pub fn with_target_file(mut self, target_file: impl Into<String>) -> Self {
        self.target_file = Some(target_file.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_clone_fallback(mut self, allow: bool) -> Self {
        self.allow_clone_fallback = allow;
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }
}

/// How a locator will be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Read an existing local file.
    LocalRead(PathBuf),
    /// GET `url`; on failure clone `clone_fallback` if there is one.
    DirectFetch {
        url: Url,
        clone_fallback: Option<String>,
    },
    /// Clone `repository` and read the target file from it.
    CloneFetch { repository: String },
    /// Nothing can be tried.
    Unresolvable,
}

/// Decide how to retrieve `locator` for `request`.
///
/// SSH references always clone. HTTP(S) URLs fetch directly first; a
/// repository URL with an explicit target fetches that file on the request's
/// branch. Local paths naming an existing file are read in place. Everything
/// else clones when fallback is allowed.
pub fn plan(locator: &Locator, request: &ResolveRequest) -> Strategy {
    let allow_clone_fallback = request.allow_clone_fallback;
    match locator {
        Locator::Ssh(reference) => Strategy::CloneFetch {
            repository: reference.clone(),
        },
        Locator::Http(url) => Strategy::DirectFetch {
            url: request
                .target_file
                .as_deref()
                .and_then(|target| repository_file_url(url, target, &request.branch))
                .unwrap_or_else(|| direct_fetch_url(url)),
            clone_fallback: allow_clone_fallback
                .then(|| derive_clone_url(url))
                .flatten(),
        },
        Locator::Local(path) if path.is_file() => Strategy::LocalRead(path.clone()),
        Locator::Local(_) | Locator::Remote(_) if allow_clone_fallback => Strategy::CloneFetch {
            repository: locator.as_str(),
        },
        Locator::Local(_) | Locator::Remote(_) => Strategy::Unresolvable,
    }
}

/// Resolves locators into configuration documents.
#[derive(Debug)]
pub struct SourceResolver<R = SystemRunner, F = ReqwestFetcher> {
    cloner: RepoCloner<R>,
    fetcher: F,
    settings: SourceSettings,
}

impl SourceResolver<SystemRunner, ReqwestFetcher> {
    /// Create a resolver that runs the system git and fetches with reqwest.
    pub fn new(settings: SourceSettings) -> Result<Self> {
        let cloner = RepoCloner::new().with_program(settings.git_program.clone());
        let fetcher = ReqwestFetcher::new(settings.http_timeout)?;
        Ok(Self::with_parts(cloner, fetcher, settings))
    }

    /// Create a resolver from `CFGSRC_*` environment settings.
    pub fn from_env() -> Result<Self> {
        Self::new(SourceSettings::from_env()?)
    }
}

impl<R: CommandRunner, F: HttpFetcher> SourceResolver<R, F> {
    /// Assemble a resolver from explicit collaborators.
    pub fn with_parts(cloner: RepoCloner<R>, fetcher: F, settings: SourceSettings) -> Self {
        Self {
            cloner,
            fetcher,
            settings,
        }
    }

    pub fn cloner(&self) -> &RepoCloner<R> {
        &self.cloner
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    /// Resolve a request into a document, or `None` if nothing was found.
    pub fn resolve(&self, request: &ResolveRequest) -> Option<ConfigDocument> {
        let Some(locator) = Locator::classify(&request.locator) else {
            tracing::debug!("Empty locator");
            return None;
        };

        let strategy = plan(&locator, request);
        tracing::debug!(%locator, ?strategy, "Resolving configuration source");

        match strategy {
            Strategy::LocalRead(path) => read_local(&path),
            Strategy::DirectFetch {
                url,
                clone_fallback,
            } => match fetch_document(&self.fetcher, &url) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Direct fetch failed");
                    let repository = clone_fallback?;
                    self.clone_fetch(&repository, &locator, request)
                }
            },
            Strategy::CloneFetch { repository } => self.clone_fetch(&repository, &locator, request),
            Strategy::Unresolvable => {
                tracing::debug!(%locator, "Locator is not readable and clone fallback is disabled");
                None
            }
        }
    }

    /// Clone `repository` into a scoped workspace and read the target file.
    fn clone_fetch(
        &self,
        repository: &str,
        locator: &Locator,
        request: &ResolveRequest,
    ) -> Option<ConfigDocument> {
        let workspace = match ClonedWorkspace::acquire(repository, request.workspace_root.as_deref()) {
            Ok(workspace) => workspace,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to prepare clone workspace");
                return None;
            }
        };

        if !self
            .cloner
            .clone_repo(workspace.path(), repository, &self.settings.clone_options())
        {
            return None;
        }

        let target = resolve_target_file(request.target_file.as_deref(), locator);
        let Some(path) = workspace.file(&target) else {
            tracing::warn!(target = %target, "Target file escapes the repository");
            return None;
        };

        let mut document = read_local(&path)?;
        document.set_origin(request.locator.trim());
        Some(document)
    }
}

fn read_local(path: &Path) -> Option<ConfigDocument> {
    match read_yaml(path) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::debug!(error = %e, "Could not read configuration");
            None
        }
    }
}
