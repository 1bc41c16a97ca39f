//! Command implementations for cfg-cli

pub mod check;
pub mod get;
pub mod resolve;

pub use check::run_check;
pub use get::run_get;
pub use resolve::run_resolve;

use cfg_core::loader::{self, resolve_with_defaults};
use cfg_core::{ConfigDocument, ResolveRequest, SourceResolver, SourceSettings};

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Resolve the document named by `source`, or fail with [`CliError::NotFound`].
pub fn resolve_document(settings: &SourceSettings, source: &SourceArgs) -> Result<ConfigDocument> {
    let resolver = SourceResolver::new(settings.clone())?;

    let mut request = ResolveRequest::new(source.locator.as_str())
        .with_branch(source.branch.as_str())
        .with_clone_fallback(!source.no_clone_fallback);
    if let Some(file) = &source.file {
        request = request.with_target_file(file.as_str());
    }
    if let Some(root) = &source.workspace_root {
        request = request.with_workspace_root(root);
    }

    let resolved = match &source.defaults {
        Some(path) => {
            let defaults = loader::load(path)?.into_mapping();
            resolve_with_defaults(&resolver, &request, &defaults)
        }
        None => resolver.resolve(&request),
    };

    resolved.ok_or_else(|| CliError::NotFound {
        locator: source.locator.clone(),
    })
}

/// Render a document as YAML or pretty JSON.
pub fn render_document(document: &ConfigDocument, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&document.to_value())?)
    } else {
        Ok(serde_yaml::to_string(document.data())?)
    }
}
