//! cfgsource CLI
//!
//! Resolves YAML configuration from local paths, HTTP(S) URLs, and git
//! repositories, and prints, extracts, or validates it.

mod cli;
mod commands;
mod error;

use cfg_core::SourceSettings;
use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Warnings always reach stderr; --verbose adds strategy decisions
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(cli.verbose)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let settings = settings_for(&cli)?;
    execute_command(&settings, cli.command)
}

/// Environment settings with command-line overrides applied.
fn settings_for(cli: &Cli) -> Result<SourceSettings> {
    let mut settings = SourceSettings::from_env()?;
    if cli.ssh_key.is_some() {
        settings = settings.with_ssh_key(cli.ssh_key.clone());
    }
    if cli.use_ssh {
        settings = settings.with_use_ssh(true);
    }
    Ok(settings)
}

fn execute_command(settings: &SourceSettings, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve {
            source,
            output,
            json,
        } => commands::run_resolve(settings, &source, output.as_deref(), json),
        Commands::Get { source, key, json } => commands::run_get(settings, &source, &key, json),
        Commands::Check { source, require } => commands::run_check(settings, &source, &require),
    }
}
