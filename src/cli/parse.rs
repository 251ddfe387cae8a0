//! CLI parse: clap types for Trak. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trak CLI - command-line client for the Trak project-tracking API
#[derive(Parser)]
#[command(name = "trak")]
#[command(about = "Command-line client for the Trak project-tracking API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Issue operations (view, update, bulk-update)
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },
    /// Label operations (apply, bulk)
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },
    /// Persisted CLI defaults (get, set, unset, list)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// Show one issue
    View {
        /// Issue ID or key (e.g. ENG-123)
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Update fields on one issue
    Update {
        /// Issue ID or key (e.g. ENG-123)
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New workflow state name
        #[arg(long)]
        state: Option<String>,
        /// New assignee
        #[arg(long)]
        assignee: Option<String>,
        /// New priority (0-4)
        #[arg(long)]
        priority: Option<u8>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Update fields on many issues at once
    BulkUpdate {
        /// Comma-separated issue IDs or keys
        #[arg(long)]
        ids: String,
        /// New workflow state name
        #[arg(long)]
        state: Option<String>,
        /// New assignee
        #[arg(long)]
        assignee: Option<String>,
        /// New priority (0-4)
        #[arg(long)]
        priority: Option<u8>,
        /// Maximum concurrent requests (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum LabelCommands {
    /// Reconcile labels on one issue
    Apply {
        /// Issue ID or key (e.g. ENG-123)
        id: String,
        /// Comma-separated label IDs to add
        #[arg(long)]
        add: Option<String>,
        /// Comma-separated label IDs to remove
        #[arg(long)]
        remove: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Reconcile labels on many issues at once
    Bulk {
        /// Comma-separated issue IDs or keys
        #[arg(long)]
        ids: String,
        /// Comma-separated label IDs to add
        #[arg(long)]
        add: Option<String>,
        /// Comma-separated label IDs to remove
        #[arg(long)]
        remove: Option<String>,
        /// Maximum concurrent requests (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show one stored value
    Get {
        /// Config key (endpoint, api_key, team, max_concurrency)
        key: String,
    },
    /// Store a value
    Set {
        /// Config key (endpoint, api_key, team, max_concurrency)
        key: String,
        /// Value to store
        value: String,
    },
    /// Remove a stored value
    Unset {
        /// Config key (endpoint, api_key, team, max_concurrency)
        key: String,
    },
    /// List stored values
    List,
}
