//! Resolve command

use std::path::Path;

use cfg_core::SourceSettings;
use colored::Colorize;

use super::{render_document, resolve_document};
use crate::cli::SourceArgs;
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(
    settings: &SourceSettings,
    source: &SourceArgs,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let document = resolve_document(settings, source)?;

    match output {
        Some(path) => {
            let written = document.try_save(Some(path))?;
            println!(
                "{} Wrote {} keys to {}",
                "OK".green().bold(),
                document.data().len(),
                written.display().to_string().cyan()
            );
        }
        None => print!("{}", render_document(&document, json)?),
    }

    Ok(())
}
