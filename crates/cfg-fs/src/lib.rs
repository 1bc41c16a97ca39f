//! Configuration documents for cfgsource
//!
//! Provides the in-memory YAML document with dot-path access, recursive
//! merge, required-key validation, and atomic persistence.

pub mod constants;
pub mod document;
pub mod error;
pub mod io;

pub use constants::{DEFAULT_CONFIG_FILE, has_yaml_extension};
pub use document::{ConfigDocument, read_yaml};
pub use error::{Error, Result};
pub use serde_yaml::{Mapping, Value};
