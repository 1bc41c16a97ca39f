//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cfgsource - Resolve YAML configuration from paths, URLs, and git repositories
#[derive(Parser, Debug)]
#[command(name = "cfgsrc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// SSH identity file used when cloning
    #[arg(long, global = true, env = "CFGSRC_SSH_KEY", value_name = "PATH")]
    pub ssh_key: Option<PathBuf>,

    /// Clone over SSH with the ambient ssh-agent and ssh config
    /// (also enabled by CFGSRC_USE_SSH)
    #[arg(long, global = true)]
    pub use_ssh: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to resolve configuration from
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Local path, HTTP(S) URL, or git repository reference
    pub locator: String,

    /// File to read from the repository (default: inferred, else init.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<String>,

    /// Branch to read --file from when fetching a repository URL over HTTP
    #[arg(long, value_name = "BRANCH", default_value = cfg_core::DEFAULT_BRANCH)]
    pub branch: String,

    /// Do not clone the repository when the locator cannot be read directly
    #[arg(long)]
    pub no_clone_fallback: bool,

    /// Directory to create clone workspaces in (default: a temporary directory)
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// Local YAML file of dot-path defaults for missing keys
    #[arg(long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve a configuration document and print it
    ///
    /// Examples:
    ///   cfgsrc resolve ./init.yaml
    ///   cfgsrc resolve https://github.com/acme/widgets/blob/main/config/init.yaml
    ///   cfgsrc resolve git@github.com:acme/widgets.git --file deploy/prod.yaml
    Resolve {
        #[command(flatten)]
        source: SourceArgs,

        /// Write the document to this path instead of printing it
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single value by dot-path key
    Get {
        #[command(flatten)]
        source: SourceArgs,

        /// Dot-path key, e.g. server.port
        key: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required keys are present and non-null
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Required dot-path key (repeatable)
        #[arg(short, long = "require", value_name = "KEY", required = true)]
        require: Vec<String>,
    },
}
