//! Persisted CLI defaults: global config file with atomic writes.
//!
//! Writes go through a temp-file-then-rename sequence in the target
//! directory, so a crash mid-write leaves either the prior file or the new
//! one, never a torn mix.

use crate::error::ApiError;
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};
use toml::value::Table;
use toml::Value;

/// Keys accepted by `trak config set`
pub const SETTABLE_KEYS: &[&str] = &["endpoint", "api_key", "team", "max_concurrency"];

/// Maps a user-facing key to its `(section, field)` in the config file.
fn section_for(key: &str) -> Result<(&'static str, &'static str), ApiError> {
    match key {
        "endpoint" => Ok(("api", "endpoint")),
        "api_key" => Ok(("api", "api_key")),
        "team" => Ok(("api", "team")),
        "max_concurrency" => Ok(("batch", "max_concurrency")),
        other => Err(ApiError::ConfigError(format!(
            "Unknown config key '{}'. Valid keys: {}",
            other,
            SETTABLE_KEYS.join(", ")
        ))),
    }
}

/// File-backed store for persisted defaults
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Path of the global config file, XDG-aware.
    pub fn global_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.config_dir().join("trak").join("config.toml"))
    }

    /// Store backed by the global config file.
    pub fn global() -> Result<Self, ApiError> {
        let path = Self::global_path().ok_or_else(|| {
            ApiError::ConfigError("Could not determine the user config directory".to_string())
        })?;
        Ok(Self { path })
    }

    /// Store backed by an explicit path. Tests and `--config` use this.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table, ApiError> {
        if !self.path.exists() {
            return Ok(Table::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let value: Value = toml::from_str(&text).map_err(|e| {
            ApiError::ConfigError(format!(
                "Could not parse {}: {}",
                self.path.display(),
                e
            ))
        })?;
        match value {
            Value::Table(table) => Ok(table),
            _ => Err(ApiError::ConfigError(format!(
                "{} is not a TOML table",
                self.path.display()
            ))),
        }
    }

    fn write_atomic(&self, table: &Table) -> Result<(), ApiError> {
        let contents = toml::to_string_pretty(&Value::Table(table.clone()))
            .map_err(|e| ApiError::ConfigError(format!("Could not serialize config: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Same directory as the target so the rename stays on one filesystem.
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read one key; `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let (section, field) = section_for(key)?;
        let root = self.read_table()?;
        Ok(root
            .get(section)
            .and_then(|s| s.get(field))
            .map(display_value))
    }

    /// Set one key, creating the file and section as needed.
    pub fn set(&self, key: &str, raw: &str) -> Result<(), ApiError> {
        let (section, field) = section_for(key)?;
        let value = typed_value(key, raw)?;

        let mut root = self.read_table()?;
        let entry = root
            .entry(section.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        let table = entry.as_table_mut().ok_or_else(|| {
            ApiError::ConfigError(format!(
                "Config section [{}] is not a table in {}",
                section,
                self.path.display()
            ))
        })?;
        table.insert(field.to_string(), value);

        self.write_atomic(&root)
    }

    /// Remove one key; empty sections are dropped. Returns whether the key
    /// was present.
    pub fn unset(&self, key: &str) -> Result<bool, ApiError> {
        let (section, field) = section_for(key)?;
        let mut root = self.read_table()?;

        let removed = match root.get_mut(section).and_then(|s| s.as_table_mut()) {
            Some(table) => table.remove(field).is_some(),
            None => false,
        };
        if removed {
            let section_empty = root
                .get(section)
                .and_then(|s| s.as_table())
                .map(|t| t.is_empty())
                .unwrap_or(false);
            if section_empty {
                root.remove(section);
            }
            self.write_atomic(&root)?;
        }
        Ok(removed)
    }

    /// All settable keys currently present, in `SETTABLE_KEYS` order.
    pub fn entries(&self) -> Result<Vec<(String, String)>, ApiError> {
        let root = self.read_table()?;
        let mut entries = Vec::new();
        for key in SETTABLE_KEYS {
            let (section, field) = section_for(key)?;
            if let Some(value) = root.get(section).and_then(|s| s.get(field)) {
                entries.push((key.to_string(), display_value(value)));
            }
        }
        Ok(entries)
    }
}

fn typed_value(key: &str, raw: &str) -> Result<Value, ApiError> {
    match key {
        "max_concurrency" => {
            let n: usize = raw.parse().map_err(|_| {
                ApiError::ConfigError(format!(
                    "max_concurrency must be a positive integer, got '{}'",
                    raw
                ))
            })?;
            if n == 0 {
                return Err(ApiError::ConfigError(
                    "max_concurrency must be at least 1".to_string(),
                ));
            }
            Ok(Value::Integer(n as i64))
        }
        _ => Ok(Value::String(raw.to_string())),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
