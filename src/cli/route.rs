//! CLI route: single route table and run context. Dispatches to the issue
//! operations and presentation; no batch or resolver orchestration here.

use crate::api::{HttpIssueClient, IssueApi, IssueUpdate};
use crate::batch::BatchConfig;
use crate::cli::parse::{Commands, ConfigCommands, IssueCommands, LabelCommands};
use crate::cli::presentation::{
    format_config_entries, format_config_value, format_issue, format_label_outcome,
    format_label_summary, format_update_summary,
};
use crate::config::{ConfigLoader, ConfigStore, TrakConfig};
use crate::error::ApiError;
use crate::ops;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: loaded config and the persisted store.
pub struct RunContext {
    config: TrakConfig,
    store: ConfigStore,
}

impl RunContext {
    /// Create run context from an optional explicit config path.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            // A fresh --config path is legal; `config set` bootstraps it.
            Some(path) if path.exists() => ConfigLoader::load_from_file(path)?,
            Some(_) => TrakConfig::default(),
            None => ConfigLoader::load()?,
        };
        // `config set` writes to the same file the explicit flag pointed at.
        let store = match config_path {
            Some(path) => ConfigStore::at(path),
            None => ConfigStore::global()?,
        };
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &TrakConfig {
        &self.config
    }

    fn build_client(&self) -> Result<Arc<dyn IssueApi>, ApiError> {
        let api_key = self.config.api.api_key.clone().unwrap_or_default();
        let client = HttpIssueClient::new(self.config.api.endpoint.clone(), api_key)?;
        Ok(Arc::new(client))
    }

    fn batch_config(&self, concurrency: Option<usize>) -> BatchConfig {
        BatchConfig {
            max_concurrency: concurrency
                .unwrap_or(self.config.batch.max_concurrency)
                .max(1),
        }
    }

    fn runtime() -> Result<tokio::runtime::Runtime, ApiError> {
        tokio::runtime::Runtime::new().map_err(|e| {
            ApiError::UnknownFailure(format!("Failed to create async runtime: {}", e))
        })
    }

    /// Execute a parsed command, returning its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Issue { command } => self.execute_issue(command),
            Commands::Label { command } => self.execute_label(command),
            Commands::Config { command } => self.execute_config(command),
        }
    }

    fn execute_issue(&self, command: &IssueCommands) -> Result<String, ApiError> {
        match command {
            IssueCommands::View { id, format } => {
                let api = self.build_client()?;
                let issue = Self::runtime()?.block_on(ops::view_issue(api, id))?;
                format_issue(&issue, format)
            }
            IssueCommands::Update {
                id,
                title,
                state,
                assignee,
                priority,
                format,
            } => {
                let update = IssueUpdate {
                    title: title.clone(),
                    state: state.clone(),
                    assignee: assignee.clone(),
                    priority: *priority,
                    labels: None,
                };
                let api = self.build_client()?;
                let issue =
                    Self::runtime()?.block_on(ops::update_issue(api, id, update))?;
                format_issue(&issue, format)
            }
            IssueCommands::BulkUpdate {
                ids,
                state,
                assignee,
                priority,
                concurrency,
                format,
            } => {
                let tokens = ops::parse_token_list(ids);
                if tokens.is_empty() {
                    return Err(ApiError::ConfigError(
                        "No issue IDs given. Pass --ids with a comma-separated list."
                            .to_string(),
                    ));
                }
                let update = IssueUpdate {
                    state: state.clone(),
                    assignee: assignee.clone(),
                    priority: *priority,
                    ..IssueUpdate::default()
                };
                let api = self.build_client()?;
                let summary = Self::runtime()?.block_on(ops::bulk_update(
                    api,
                    &self.batch_config(*concurrency),
                    tokens,
                    update,
                ))?;
                info!(
                    total = summary.total_requested,
                    failed = summary.failed_count,
                    "bulk update finished"
                );
                format_update_summary(&summary, format)
            }
        }
    }

    fn execute_label(&self, command: &LabelCommands) -> Result<String, ApiError> {
        match command {
            LabelCommands::Apply {
                id,
                add,
                remove,
                format,
            } => {
                let to_add = ops::parse_label_list(add.as_deref().unwrap_or(""));
                let to_remove = ops::parse_label_list(remove.as_deref().unwrap_or(""));
                let api = self.build_client()?;
                let outcome = Self::runtime()?
                    .block_on(ops::apply_labels(api, id, to_add, to_remove))?;
                format_label_outcome(id, &outcome, format)
            }
            LabelCommands::Bulk {
                ids,
                add,
                remove,
                concurrency,
                format,
            } => {
                let tokens = ops::parse_token_list(ids);
                if tokens.is_empty() {
                    return Err(ApiError::ConfigError(
                        "No issue IDs given. Pass --ids with a comma-separated list."
                            .to_string(),
                    ));
                }
                let to_add = ops::parse_label_list(add.as_deref().unwrap_or(""));
                let to_remove = ops::parse_label_list(remove.as_deref().unwrap_or(""));
                let api = self.build_client()?;
                let summary = Self::runtime()?.block_on(ops::bulk_labels(
                    api,
                    &self.batch_config(*concurrency),
                    tokens,
                    to_add,
                    to_remove,
                ))?;
                info!(
                    total = summary.total_requested,
                    failed = summary.failed_count,
                    "bulk label reconciliation finished"
                );
                format_label_summary(&summary, format)
            }
        }
    }

    fn execute_config(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Get { key } => {
                let value = self.store.get(key)?;
                Ok(format_config_value(key, value.as_deref()))
            }
            ConfigCommands::Set { key, value } => {
                self.store.set(key, value)?;
                Ok(format!("Set {}.", key))
            }
            ConfigCommands::Unset { key } => {
                if self.store.unset(key)? {
                    Ok(format!("Removed {}.", key))
                } else {
                    Ok(format!("{} was not set.", key))
                }
            }
            ConfigCommands::List => {
                let entries = self.store.entries()?;
                Ok(format_config_entries(&entries))
            }
        }
    }
}
