//! Loading with defaults and saving with validation

use std::path::Path;

use cfg_fs::{ConfigDocument, Mapping, read_yaml};
use cfg_git::CommandRunner;

use crate::Result;
use crate::fetch::HttpFetcher;
use crate::resolver::{ResolveRequest, SourceResolver};

/// Load a document from a local file, failing if it cannot be read.
pub fn load(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    Ok(read_yaml(path)?)
}

/// Load a document and fill in defaults for missing keys.
///
/// Returns `None` when the file cannot be read; the cause is logged.
pub fn load_with_defaults(path: impl AsRef<Path>, defaults: &Mapping) -> Option<ConfigDocument> {
    let path = path.as_ref();
    match read_yaml(path) {
        Ok(mut document) => {
            apply_defaults(&mut document, defaults);
            Some(document)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load configuration");
            None
        }
    }
}

/// Set every default whose dot-path key does not exist in `document`.
///
/// Existing keys are kept even when their value is null. Non-string keys in
/// `defaults` are ignored.
pub fn apply_defaults(document: &mut ConfigDocument, defaults: &Mapping) {
    for (key, value) in defaults {
        let Some(key) = key.as_str() else {
            continue;
        };
        if !document.exists_key(key) {
            tracing::debug!(key, "Applying default");
            document.set(key, value.clone());
        }
    }
}

/// Resolve a request and fill in defaults on the result.
pub fn resolve_with_defaults<R: CommandRunner, F: HttpFetcher>(
    resolver: &SourceResolver<R, F>,
    request: &ResolveRequest,
    defaults: &Mapping,
) -> Option<ConfigDocument> {
    let mut document = resolver.resolve(request)?;
    apply_defaults(&mut document, defaults);
    Some(document)
}

/// Save `data` to `path`, warning about any missing required keys first.
///
/// Missing keys do not prevent the save.
pub fn save_with_validation<S: AsRef<str>>(
    data: Mapping,
    path: impl AsRef<Path>,
    required_keys: &[S],
) -> bool {
    let path = path.as_ref();
    let document = ConfigDocument::new(data);

    let missing = document.missing_keys(required_keys);
    if !missing.is_empty() {
        tracing::warn!(
            path = %path.display(),
            missing = %missing.join(", "),
            "Configuration is missing required keys"
        );
    }

    document.save(Some(path))
}
