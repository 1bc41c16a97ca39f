//! Get command

use cfg_core::{SourceSettings, Value};

use super::resolve_document;
use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Run the get command
pub fn run_get(settings: &SourceSettings, source: &SourceArgs, key: &str, json: bool) -> Result<()> {
    let document = resolve_document(settings, source)?;
    let value = document
        .get(key)
        .ok_or_else(|| CliError::user(format!("Key '{key}' not found in '{}'", source.locator)))?;

    println!("{}", render_value(value, json)?);
    Ok(())
}

/// Scalars print bare; mappings and sequences print as YAML (or JSON).
pub fn render_value(value: &Value, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(value)?);
    }

    let rendered = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)?.trim_end().to_string(),
    };
    Ok(rendered)
}
