//! Git repository fixtures at two realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Creates a minimal `.git` directory structure **without** initialising a
/// real git repository.
///
/// Realism level: **FAKE**: directory structure only.
///
/// Use for: history-stripping tests driven by a scripted command runner.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Run a git command in `path`, panicking with stderr on failure.
///
/// # Panics
/// Panics if git cannot be spawned or exits nonzero.
pub fn git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Initialises a real git repository at `path` and commits `files`.
///
/// Realism level: **REAL WITH HISTORY**: valid git state, one commit that
/// contains every file in `files` (paths relative to `path`, parents created).
///
/// # Panics
/// Panics if any git or filesystem operation fails.
pub fn real_git_repo_with_files(path: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("real_git_repo_with_files: failed to create {}: {e}", path.display()));

    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_files: failed to write README.md: {e}"));
    for (relative, content) in files {
        let file = path.join(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("real_git_repo_with_files: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&file, content).unwrap_or_else(|e| {
            panic!("real_git_repo_with_files: failed to write {}: {e}", file.display())
        });
    }

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
}
