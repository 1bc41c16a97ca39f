//! Git plumbing for cfgsource
//!
//! Clones repositories through the `git` executable and provides the URL
//! and environment helpers the source resolver needs.

pub mod cloner;
pub mod env;
pub mod error;
pub mod naming;
pub mod process;
pub mod remote;

pub use cloner::{CloneOptions, RepoCloner};
pub use env::build_git_env;
pub use error::{Error, Result};
pub use naming::workspace_dir_name;
pub use process::{CommandRunner, SystemRunner};
