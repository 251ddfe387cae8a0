//! Shared test fixtures: an in-memory tracker API double with call counters.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use trak::api::{IssueApi, IssueUpdate, IssueView};
use trak::error::ApiError;

pub fn labels(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub fn issue(id: &str, key: &str, label_ids: &[&str]) -> IssueView {
    IssueView {
        id: id.to_string(),
        key: key.to_string(),
        title: format!("Issue {}", key),
        state: Some("Todo".to_string()),
        assignee: None,
        priority: None,
        labels: labels(label_ids),
        updated_at: None,
    }
}

/// In-memory stand-in for the remote tracker
#[derive(Default)]
pub struct MockIssueApi {
    issues: Mutex<HashMap<String, IssueView>>,
    by_key: HashMap<(String, u64), String>,
    fail_updates_for: HashSet<String>,
    pub lookup_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub label_fetches: AtomicUsize,
}

impl MockIssueApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, prefix: &str, number: u64, view: IssueView) -> Self {
        self.by_key
            .insert((prefix.to_string(), number), view.id.clone());
        self.issues.lock().unwrap().insert(view.id.clone(), view);
        self
    }

    /// Make `apply_update` fail for this issue ID with a remote error.
    pub fn failing_update(mut self, issue_id: &str) -> Self {
        self.fail_updates_for.insert(issue_id.to_string());
        self
    }

    pub fn stored_issue(&self, issue_id: &str) -> Option<IssueView> {
        self.issues.lock().unwrap().get(issue_id).cloned()
    }
}

#[async_trait]
impl IssueApi for MockIssueApi {
    async fn lookup_by_composite(&self, prefix: &str, number: u64) -> Result<String, ApiError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.by_key
            .get(&(prefix.to_string(), number))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{}-{}", prefix, number)))
    }

    async fn get_issue(&self, issue_id: &str) -> Result<IssueView, ApiError> {
        self.issues
            .lock()
            .unwrap()
            .get(issue_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(issue_id.to_string()))
    }

    async fn get_labels(&self, issue_id: &str) -> Result<BTreeSet<String>, ApiError> {
        self.label_fetches.fetch_add(1, Ordering::SeqCst);
        self.issues
            .lock()
            .unwrap()
            .get(issue_id)
            .map(|issue| issue.labels.clone())
            .ok_or_else(|| ApiError::NotFound(issue_id.to_string()))
    }

    async fn apply_update(
        &self,
        issue_id: &str,
        update: IssueUpdate,
    ) -> Result<IssueView, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates_for.contains(issue_id) {
            return Err(ApiError::RemoteOperationFailed(format!(
                "update rejected for {}",
                issue_id
            )));
        }
        let mut issues = self.issues.lock().unwrap();
        let issue = issues
            .get_mut(issue_id)
            .ok_or_else(|| ApiError::NotFound(issue_id.to_string()))?;
        if let Some(title) = update.title {
            issue.title = title;
        }
        if let Some(state) = update.state {
            issue.state = Some(state);
        }
        if let Some(assignee) = update.assignee {
            issue.assignee = Some(assignee);
        }
        if let Some(priority) = update.priority {
            issue.priority = Some(priority);
        }
        if let Some(labels) = update.labels {
            issue.labels = labels;
        }
        Ok(issue.clone())
    }
}
