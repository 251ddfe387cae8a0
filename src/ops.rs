//! Issue operation entry points: resolve, reconcile, mutate, aggregate.
//! CLI routes call these only; no batch or resolver orchestration in the
//! presentation layer.

use crate::api::{IssueApi, IssueUpdate, IssueView};
use crate::batch::{aggregate, run_batch, BatchConfig, BatchItem, BatchItemResult, BatchSummary};
use crate::error::ApiError;
use crate::identifier::{Identifier, IdentifierResolver};
use crate::label::{reconcile, LabelDelta};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Split a raw comma-separated token list: trim, drop empties, dedupe.
///
/// Deduplication keys on the parsed normal form where the token parses
/// (`eng-1` and `ENG-1` are the same issue); unparseable tokens dedupe on
/// their trimmed text and stay in the list so they surface as per-item
/// failures instead of vanishing silently. First occurrence wins.
pub fn parse_token_list(raw: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut tokens = Vec::new();
    for piece in raw.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let key = match Identifier::parse(piece) {
            Ok(id) => id.to_string(),
            Err(_) => piece.to_string(),
        };
        if seen.insert(key) {
            tokens.push(piece.to_string());
        }
    }
    tokens
}

/// Split a raw comma-separated label-ID list: trim, drop empties. The set
/// type deduplicates on its own.
pub fn parse_label_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// A token that made it through the resolution phase
#[derive(Debug, Clone)]
pub struct ResolvedIssue {
    pub token: String,
    pub issue_id: String,
}

impl BatchItem for ResolvedIssue {
    fn identifier(&self) -> String {
        self.token.clone()
    }
}

/// Per-item payload of a label mutation
#[derive(Debug, Clone, Serialize)]
pub struct LabelOutcome {
    /// Labels actually added (requested and previously absent)
    pub added: BTreeSet<String>,
    /// Labels actually removed (requested and previously present)
    pub removed: BTreeSet<String>,
    /// Full label set after the mutation
    pub labels: BTreeSet<String>,
}

impl From<LabelDelta> for LabelOutcome {
    fn from(delta: LabelDelta) -> Self {
        LabelOutcome {
            added: delta.effective_add,
            removed: delta.effective_remove,
            labels: delta.final_set,
        }
    }
}

/// Resolve and fetch a single issue.
pub async fn view_issue(api: Arc<dyn IssueApi>, token: &str) -> Result<IssueView, ApiError> {
    let resolver = IdentifierResolver::new(Arc::clone(&api));
    let issue_id = resolver.resolve(token).await?;
    api.get_issue(&issue_id).await
}

/// Resolve and mutate a single issue.
pub async fn update_issue(
    api: Arc<dyn IssueApi>,
    token: &str,
    update: IssueUpdate,
) -> Result<IssueView, ApiError> {
    if update.is_empty() {
        return Err(ApiError::ConfigError(
            "Nothing to update. Pass at least one of --title, --state, --assignee, --priority."
                .to_string(),
        ));
    }
    let resolver = IdentifierResolver::new(Arc::clone(&api));
    let issue_id = resolver.resolve(token).await?;
    api.apply_update(&issue_id, update).await
}

/// Resolve one issue, reconcile its labels, and apply the final set in a
/// single update call. A no-op reconciliation skips the mutation entirely.
pub async fn apply_labels(
    api: Arc<dyn IssueApi>,
    token: &str,
    to_add: BTreeSet<String>,
    to_remove: BTreeSet<String>,
) -> Result<LabelOutcome, ApiError> {
    if to_add.is_empty() && to_remove.is_empty() {
        return Err(ApiError::ConfigError(
            "Nothing to reconcile. Pass --add and/or --remove with label IDs.".to_string(),
        ));
    }
    let resolver = IdentifierResolver::new(Arc::clone(&api));
    let issue_id = resolver.resolve(token).await?;
    mutate_labels(api, &issue_id, &to_add, &to_remove).await
}

async fn mutate_labels(
    api: Arc<dyn IssueApi>,
    issue_id: &str,
    to_add: &BTreeSet<String>,
    to_remove: &BTreeSet<String>,
) -> Result<LabelOutcome, ApiError> {
    let current = api.get_labels(issue_id).await?;
    let delta = reconcile(&current, to_add, to_remove);
    if delta.is_noop() {
        return Ok(LabelOutcome::from(delta));
    }
    let update = IssueUpdate {
        labels: Some(delta.final_set.clone()),
        ..IssueUpdate::default()
    };
    api.apply_update(issue_id, update).await?;
    Ok(LabelOutcome::from(delta))
}

/// Shared bulk pipeline: resolve every token (a batch in itself), run the
/// mutation work per resolved issue (a second batch), then merge resolution
/// failures back in and aggregate. Failures in either phase stay confined to
/// their own item. Tokens are expected pre-deduplicated; `parse_token_list`
/// does that for CLI input.
async fn run_bulk<T, F, Fut>(
    api: Arc<dyn IssueApi>,
    config: &BatchConfig,
    tokens: Vec<String>,
    work: F,
) -> BatchSummary<T>
where
    T: Send + 'static,
    F: Fn(ResolvedIssue) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let resolver = Arc::new(IdentifierResolver::new(api));
    let resolutions = run_batch(tokens.clone(), config, move |token: String| {
        let resolver = Arc::clone(&resolver);
        async move { resolver.resolve(&token).await }
    })
    .await;

    let mut by_token: HashMap<String, BatchItemResult<T>> = HashMap::new();
    let mut resolved = Vec::new();
    for result in resolutions {
        match (result.success, result.payload.clone()) {
            (true, Some(issue_id)) => resolved.push(ResolvedIssue {
                token: result.identifier,
                issue_id,
            }),
            _ => {
                by_token.insert(result.identifier.clone(), result.into_retyped());
            }
        }
    }

    let id_by_token: HashMap<String, String> = resolved
        .iter()
        .map(|r| (r.token.clone(), r.issue_id.clone()))
        .collect();

    let mutation_results = run_batch(resolved, config, work).await;
    for result in mutation_results {
        let internal_id = id_by_token.get(&result.identifier).cloned();
        by_token.insert(
            result.identifier.clone(),
            result.with_internal_id(internal_id),
        );
    }

    // Restore the caller's input order; both phases echo the original token.
    let mut results = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if let Some(result) = by_token.remove(token) {
            results.push(result);
        }
    }
    results.extend(by_token.into_values());

    aggregate(results)
}

/// Bulk field update: resolve every token, mutate every resolved issue,
/// aggregate.
pub async fn bulk_update(
    api: Arc<dyn IssueApi>,
    config: &BatchConfig,
    tokens: Vec<String>,
    update: IssueUpdate,
) -> Result<BatchSummary<IssueView>, ApiError> {
    if update.is_empty() {
        return Err(ApiError::ConfigError(
            "Nothing to update. Pass at least one of --state, --assignee, --priority."
                .to_string(),
        ));
    }
    info!(total = tokens.len(), "bulk update requested");

    let work_api = Arc::clone(&api);
    Ok(run_bulk(api, config, tokens, move |item: ResolvedIssue| {
        let api = Arc::clone(&work_api);
        let update = update.clone();
        async move { api.apply_update(&item.issue_id, update).await }
    })
    .await)
}

/// Bulk label reconciliation: per item, fetch the current set, reconcile,
/// and apply the final set in one update call.
pub async fn bulk_labels(
    api: Arc<dyn IssueApi>,
    config: &BatchConfig,
    tokens: Vec<String>,
    to_add: BTreeSet<String>,
    to_remove: BTreeSet<String>,
) -> Result<BatchSummary<LabelOutcome>, ApiError> {
    if to_add.is_empty() && to_remove.is_empty() {
        return Err(ApiError::ConfigError(
            "Nothing to reconcile. Pass --add and/or --remove with label IDs.".to_string(),
        ));
    }
    info!(
        total = tokens.len(),
        add = to_add.len(),
        remove = to_remove.len(),
        "bulk label reconciliation requested"
    );

    let work_api = Arc::clone(&api);
    Ok(run_bulk(api, config, tokens, move |item: ResolvedIssue| {
        let api = Arc::clone(&work_api);
        let to_add = to_add.clone();
        let to_remove = to_remove.clone();
        async move { mutate_labels(api, &item.issue_id, &to_add, &to_remove).await }
    })
    .await)
}
