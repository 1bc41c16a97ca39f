//! Shared file-name conventions.

/// File name used when none can be inferred from a locator.
pub const DEFAULT_CONFIG_FILE: &str = "init.yaml";

/// Extensions treated as YAML documents (compared case-insensitively).
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Check whether a file name or path segment carries a YAML-like extension.
pub fn has_yaml_extension(name: &str) -> bool {
    match name.rfind('.') {
        Some(idx) if idx > 0 => {
            let ext = &name[idx + 1..];
            YAML_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
        }
        _ => false,
    }
}
