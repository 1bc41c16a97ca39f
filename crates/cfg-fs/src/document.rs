//! In-memory YAML configuration document
//!
//! A [`ConfigDocument`] always has a mapping at its root. Nested values are
//! addressed with dot-paths such as `server.tls.enabled`; traversal only
//! descends through mappings.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::{Error, Result, io};

/// A loaded configuration document and the locator it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    data: Mapping,
    /// Path or URL the document was loaded from; the default save target.
    origin: Option<String>,
}

impl ConfigDocument {
    /// Create a document from a mapping, without an origin.
    pub fn new(data: Mapping) -> Self {
        Self { data, origin: None }
    }

    /// Create a document from any YAML value.
    ///
    /// A null or non-mapping root is replaced with an empty mapping.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Mapping(data) => Self::new(data),
            Value::Null => Self::default(),
            other => {
                tracing::debug!(
                    kind = value_kind(&other),
                    "Document root is not a mapping, substituting empty mapping"
                );
                Self::default()
            }
        }
    }

    /// Parse YAML text into a document with the given origin.
    ///
    /// Empty input yields an empty document.
    pub fn parse(content: &str, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let value: Value = serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::from_value(value).with_origin(origin))
    }

    /// Set the origin locator, consuming and returning the document.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.origin = Some(origin.into());
    }

    /// Borrow the root mapping.
    pub fn data(&self) -> &Mapping {
        &self.data
    }

    pub fn into_mapping(self) -> Mapping {
        self.data
    }

    /// Clone the root mapping into a standalone value.
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.data.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn lookup(&self, key_path: &str) -> Option<&Value> {
        let mut segments = key_path.split('.');
        let first = segments.next()?;
        let mut value = self.data.get(first)?;
        for segment in segments {
            value = value.as_mapping()?.get(segment)?;
        }
        Some(value)
    }

    /// Check if a key exists, regardless of its value.
    pub fn exists_key(&self, key_path: &str) -> bool {
        self.lookup(key_path).is_some()
    }

    /// Get the value at a dot-path.
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        self.lookup(key_path)
    }

    /// Get the value at a dot-path, or `default` when it is not reachable.
    pub fn get_or<'a>(&'a self, key_path: &str, default: &'a Value) -> &'a Value {
        self.lookup(key_path).unwrap_or(default)
    }

    /// Deserialize the value at a dot-path into `T`.
    ///
    /// Returns `None` when the key is missing or has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, key_path: &str) -> Option<T> {
        let value = self.lookup(key_path)?;
        serde_yaml::from_value(value.clone()).ok()
    }

    /// Check that a value exists at the dot-path and is not null.
    pub fn has_value(&self, key_path: &str) -> bool {
        self.lookup(key_path).is_some_and(|v| !v.is_null())
    }

    /// Set a value at a dot-path, creating intermediate mappings.
    ///
    /// An intermediate segment holding a non-mapping value is overwritten
    /// with an empty mapping. The previous value is lost.
    pub fn set(&mut self, key_path: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = key_path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };

        let mut current = &mut self.data;
        for segment in segments {
            let slot = current
                .entry(Value::String(segment.to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !slot.is_mapping() {
                *slot = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(next) = slot else {
                return;
            };
            current = next;
        }

        current.insert(Value::String(last.to_string()), value.into());
    }

    /// Keys from `required` that do not exist in the document.
    pub fn missing_keys<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|key| !self.exists_key(key))
            .map(str::to_string)
            .collect()
    }

    /// All keys exist. Null values count as present.
    pub fn has_required_keys<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|key| self.exists_key(key.as_ref()))
    }

    /// All keys exist and hold non-null values.
    pub fn validate_structure<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|key| self.has_value(key.as_ref()))
    }

    /// Return a new document with `overrides` merged on top of this one.
    ///
    /// Mappings present on both sides merge key-wise; anything else is
    /// replaced by the override. The receiver is left untouched.
    pub fn merge(&self, overrides: &Mapping) -> Self {
        let mut data = self.data.clone();
        merge_mapping(&mut data, overrides);
        Self {
            data,
            origin: self.origin.clone(),
        }
    }

    /// Save to `path`, or to the origin when no path is given.
    ///
    /// Returns `false` on any failure; the cause is logged.
    pub fn save(&self, path: Option<&Path>) -> bool {
        match self.try_save(path) {
            Ok(target) => {
                tracing::debug!(path = %target.display(), "Saved configuration");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save configuration");
                false
            }
        }
    }

    /// Save like [`save`](Self::save) but report why it failed.
    pub fn try_save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let target = match (path, self.origin.as_deref()) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(origin)) if is_remote_origin(origin) => {
                return Err(Error::RemoteOrigin {
                    origin: origin.to_string(),
                });
            }
            (None, Some(origin)) => PathBuf::from(origin),
            (None, None) => return Err(Error::MissingSaveTarget),
        };

        let content = serde_yaml::to_string(&self.data).map_err(|e| Error::ConfigSerialize {
            path: target.clone(),
            message: e.to_string(),
        })?;
        io::write_atomic(&target, content.as_bytes())?;
        Ok(target)
    }
}

impl From<Mapping> for ConfigDocument {
    fn from(data: Mapping) -> Self {
        Self::new(data)
    }
}

/// Read a YAML document from an explicitly named local file.
///
/// A missing file, an unreadable file, and invalid YAML all fail with
/// [`Error::ConfigNotFound`] naming the path.
pub fn read_yaml(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
            reason: "no such file".into(),
        });
    }

    let not_found = |reason: String| Error::ConfigNotFound {
        path: path.to_path_buf(),
        reason,
    };
    let content = io::read_text(path).map_err(|e| not_found(e.to_string()))?;
    ConfigDocument::parse(&content, path.display().to_string()).map_err(|e| not_found(e.to_string()))
}

/// URL (`scheme://...`), scp-like (`user@host:path`) and bare `host:path`
/// origins cannot be written back to. A single letter before the colon is a
/// Windows drive.
fn is_remote_origin(origin: &str) -> bool {
    if origin.contains("://") {
        return true;
    }
    origin.split_once(':').is_some_and(|(prefix, _)| {
        prefix.chars().count() > 1 && !prefix.contains(['/', '\\'])
    })
}

fn merge_mapping(base: &mut Mapping, overrides: &Mapping) {
    for (key, override_value) in overrides {
        if let (Some(Value::Mapping(base_map)), Value::Mapping(override_map)) =
            (base.get_mut(key), override_value)
        {
            merge_mapping(base_map, override_map);
            continue;
        }
        base.insert(key.clone(), override_value.clone());
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
