//! [`ConfigRepo`] builder for clone-fetch test scenarios.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::git;

/// A real git repository of YAML files inside a temporary directory.
///
/// The repository lives in a `config-repo` subdirectory so its short name
/// is predictable.
///
/// # Example
///
/// ```rust,no_run
/// use cfg_test_utils::repo::ConfigRepo;
///
/// let repo = ConfigRepo::with_files(&[("init.yaml", "name: demo\n")]);
/// let reference = repo.reference();
/// ```
pub struct ConfigRepo {
    temp_dir: TempDir,
    path: PathBuf,
}

impl ConfigRepo {
    /// Create and commit a repository containing `files`.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config-repo");
        git::real_git_repo_with_files(&path, files);
        Self { temp_dir, path }
    }

    /// Directory holding the temporary fixture.
    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Working tree of the repository.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The repository as a clonable reference string.
    pub fn reference(&self) -> String {
        self.path.display().to_string()
    }

    /// Assert that `path` (relative to the repo root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path.join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
