//! Configuration System
//!
//! Layered configuration for the CLI: built-in defaults, the global config
//! file under the user config directory, then `TRAK_*` environment variable
//! overrides. Commands receive the loaded config through `RunContext`; no
//! module reads ambient process state on its own.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod store;

pub use store::{ConfigStore, SETTABLE_KEYS};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrakConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Batch execution settings
    #[serde(default)]
    pub batch: BatchSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint; falls back to the public endpoint when unset
    pub endpoint: Option<String>,
    /// Bearer token for the tracker API
    pub api_key: Option<String>,
    /// Default team prefix for bare-number shortcuts and display
    pub team: Option<String>,
}

/// Batch execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    /// Maximum concurrent requests during bulk operations
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    8
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl TrakConfig {
    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.batch.max_concurrency == 0 {
            return Err(ApiError::ConfigError(
                "batch.max_concurrency must be at least 1".to_string(),
            ));
        }
        if let Some(endpoint) = &self.api.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ApiError::ConfigError(format!(
                    "Invalid endpoint '{}': must start with http:// or https://",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}

/// Loads configuration from the global file and environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with the standard layering: defaults, global file, environment.
    pub fn load() -> Result<TrakConfig, ApiError> {
        let mut builder = Config::builder();

        if let Some(global_path) = ConfigStore::global_path() {
            if global_path.exists() {
                builder = builder.add_source(
                    File::from(global_path.as_path()).required(false),
                );
            }
        }

        let mut config: TrakConfig = builder
            .build()
            .map_err(ApiError::from)?
            .try_deserialize()
            .map_err(ApiError::from)?;

        apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file path, still honoring environment overrides.
    pub fn load_from_file(path: &Path) -> Result<TrakConfig, ApiError> {
        let mut config: TrakConfig = Config::builder()
            .add_source(File::from(path).required(true))
            .build()
            .map_err(ApiError::from)?
            .try_deserialize()
            .map_err(ApiError::from)?;

        apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut TrakConfig) {
    if let Ok(key) = std::env::var("TRAK_API_KEY") {
        if !key.is_empty() {
            config.api.api_key = Some(key);
        }
    }
    if let Ok(endpoint) = std::env::var("TRAK_ENDPOINT") {
        if !endpoint.is_empty() {
            config.api.endpoint = Some(endpoint);
        }
    }
    if let Ok(team) = std::env::var("TRAK_TEAM") {
        if !team.is_empty() {
            config.api.team = Some(team);
        }
    }
}
