//! Scoped clone workspace
//!
//! A [`ClonedWorkspace`] is the directory a single resolution clones into.
//! Dropping it removes the directory, then every directory the workspace
//! created to hold it (the root and any missing parents) while they are
//! empty.

use std::io;
use std::path::{Component, Path, PathBuf};

use cfg_git::workspace_dir_name;

use crate::{Error, Result};

/// Prefix of temporary roots created when the caller supplies none.
pub const TEMP_ROOT_PREFIX: &str = "cfgsrc_clone_";

/// Clone destination, cleaned up on drop.
#[derive(Debug)]
pub struct ClonedWorkspace {
    root: PathBuf,
    dir: PathBuf,
    /// Directories created by `acquire`, innermost (the root) first.
    created: Vec<PathBuf>,
}

impl ClonedWorkspace {
    /// Prepare a workspace for `reference`.
    ///
    /// With `root`, the workspace is nested there; the root and its missing
    /// parents are created and only owned when this call created them. A
    /// root that already existed is never removed. Without `root`, a
    /// fresh temporary root is created and owned. Any stale directory at the
    /// workspace path is removed; the directory itself is left for the
    /// clone to create.
    pub fn acquire(reference: &str, root: Option<&Path>) -> Result<Self> {
        let (root, created) = match root {
            Some(root) => {
                let created: Vec<PathBuf> = root
                    .ancestors()
                    .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
                    .map(Path::to_path_buf)
                    .collect();
                std::fs::create_dir_all(root).map_err(|source| Error::Workspace {
                    path: root.to_path_buf(),
                    source,
                })?;
                (root.to_path_buf(), created)
            }
            None => {
                let root = tempfile::Builder::new()
                    .prefix(TEMP_ROOT_PREFIX)
                    .tempdir()
                    .map_err(|source| Error::Workspace {
                        path: std::env::temp_dir(),
                        source,
                    })?
                    .keep();
                (root.clone(), vec![root])
            }
        };

        let dir = root.join(workspace_dir_name(reference));
        let workspace = Self { root, dir, created };

        if workspace.dir.exists() {
            tracing::debug!(path = %workspace.dir.display(), "Removing stale workspace");
            remove_path(&workspace.dir).map_err(|source| Error::Workspace {
                path: workspace.dir.clone(),
                source,
            })?;
        }

        tracing::debug!(
            path = %workspace.dir.display(),
            owns_root = workspace.owns_root(),
            "Prepared clone workspace"
        );
        Ok(workspace)
    }

    /// Directory the repository is cloned into.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn owns_root(&self) -> bool {
        !self.created.is_empty()
    }

    /// Join a repository-relative path onto the workspace.
    ///
    /// Returns `None` for absolute paths and paths that climb out with `..`.
    pub fn file(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.dir.join(relative))
    }
}

impl Drop for ClonedWorkspace {
    fn drop(&mut self) {
        match remove_path(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.dir.display(), error = %e, "Failed to remove workspace");
            }
        }

        for dir in &self.created {
            if !is_empty_dir(dir) {
                break;
            }
            if let Err(e) = std::fs::remove_dir(dir) {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to remove workspace root");
                break;
            }
        }
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_owned_temp_root_removed_on_drop() {
        let workspace = ClonedWorkspace::acquire("https://github.com/acme/widgets.git", None).unwrap();
        let root = workspace.root().to_path_buf();
        assert!(workspace.owns_root());
        assert!(root.file_name().unwrap().to_string_lossy().starts_with(TEMP_ROOT_PREFIX));
        assert!(workspace.path().ends_with("widgets_yaml"));

        std::fs::create_dir_all(workspace.path()).unwrap();
        std::fs::write(workspace.path().join("init.yaml"), "a: 1\n").unwrap();

        drop(workspace);
        assert!(!root.exists());
    }

    #[test]
    fn test_caller_root_kept() {
        let temp = TempDir::new().unwrap();
        let workspace = ClonedWorkspace::acquire("widgets", Some(temp.path())).unwrap();
        assert!(!workspace.owns_root());
        std::fs::create_dir_all(workspace.path()).unwrap();
        let dir = workspace.path().to_path_buf();

        drop(workspace);
        assert!(!dir.exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_created_caller_root_removed_when_empty() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested/clones");
        let workspace = ClonedWorkspace::acquire("widgets", Some(&root)).unwrap();
        assert!(workspace.owns_root());
        assert!(root.is_dir());

        drop(workspace);
        assert!(!root.exists());
        assert!(!temp.path().join("nested").exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_created_parent_kept_when_not_empty() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested/clones");
        let workspace = ClonedWorkspace::acquire("widgets", Some(&root)).unwrap();
        std::fs::write(temp.path().join("nested/notes.txt"), "mine").unwrap();

        drop(workspace);
        assert!(!root.exists());
        assert!(temp.path().join("nested/notes.txt").exists());
    }

    #[test]
    fn test_stale_directory_removed() {
        let temp = TempDir::new().unwrap();
        let stale = temp.path().join("widgets_yaml");
        std::fs::create_dir_all(stale.join("old")).unwrap();

        let workspace = ClonedWorkspace::acquire("widgets", Some(temp.path())).unwrap();
        assert_eq!(workspace.path(), stale);
        assert!(!stale.exists());
    }

    #[test]
    fn test_file_rejects_escapes() {
        let temp = TempDir::new().unwrap();
        let workspace = ClonedWorkspace::acquire("widgets", Some(temp.path())).unwrap();

        assert_eq!(
            workspace.file("config/init.yaml"),
            Some(workspace.path().join("config/init.yaml"))
        );
        assert_eq!(workspace.file("/init.yaml"), Some(workspace.path().join("init.yaml")));
        assert_eq!(workspace.file("../outside.yaml"), None);
        assert_eq!(workspace.file(""), None);
    }
}
