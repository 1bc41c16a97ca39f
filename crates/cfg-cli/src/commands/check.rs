//! Check command

use cfg_core::{ConfigDocument, SourceSettings};
use colored::Colorize;

use super::resolve_document;
use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Run the check command
pub fn run_check(settings: &SourceSettings, source: &SourceArgs, required: &[String]) -> Result<()> {
    let document = resolve_document(settings, source)?;
    let missing = missing_values(&document, required);

    if !missing.is_empty() {
        return Err(CliError::user(format!(
            "Missing required keys: {}",
            missing.join(", ")
        )));
    }

    println!(
        "{} All {} required keys present in {}",
        "OK".green().bold(),
        required.len(),
        source.locator.cyan()
    );
    Ok(())
}

/// Keys that are absent or null.
fn missing_values(document: &ConfigDocument, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !document.has_value(key))
        .cloned()
        .collect()
}
