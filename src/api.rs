//! Tracker API Boundary
//!
//! Trait and data types for the remote project-tracking service. The CLI core
//! only talks to this trait; the HTTP implementation lives in `api::http`.
//! Retries, backoff, and auth refresh are the transport's concern, never the
//! caller's.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod http;

pub use http::HttpIssueClient;

/// Issue fields as returned by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueView {
    pub id: String,
    /// Human-readable key, e.g. `ENG-123`
    pub key: String,
    pub title: String,
    pub state: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<u8>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Mutation payload for a single issue. `None` fields are left untouched
/// by the remote service; `labels` replaces the full label set when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeSet<String>>,
}

impl IssueUpdate {
    /// True when no field would change anything remotely.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.state.is_none()
            && self.assignee.is_none()
            && self.priority.is_none()
            && self.labels.is_none()
    }
}

/// Remote tracker API client trait
///
/// Every method is a single network attempt from the caller's point of view.
/// The label-set write in `apply_update` is assumed atomic on the remote side.
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Translate a composite key `(PREFIX, NUMBER)` into the opaque issue ID.
    async fn lookup_by_composite(&self, prefix: &str, number: u64) -> Result<String, ApiError>;

    /// Fetch a single issue by opaque ID.
    async fn get_issue(&self, issue_id: &str) -> Result<IssueView, ApiError>;

    /// Fetch the current label set of an issue.
    async fn get_labels(&self, issue_id: &str) -> Result<BTreeSet<String>, ApiError>;

    /// Apply a mutation to an issue and return the updated view.
    async fn apply_update(&self, issue_id: &str, update: IssueUpdate)
        -> Result<IssueView, ApiError>;
}
