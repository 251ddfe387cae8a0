//! Batch Task Runner
//!
//! Executes independent units of async work concurrently with per-item
//! failure isolation. Every submitted item produces exactly one result; a
//! failing or panicking item never aborts its siblings, and the runner only
//! returns once all items have completed. A semaphore caps in-flight work so
//! large batches do not overwhelm the remote API.

use crate::error::ApiError;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Batch execution settings
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of work items in flight at once
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_concurrency: 8 }
    }
}

/// Anything submittable to `run_batch`. The identifier is echoed on the
/// item's result so callers can correlate outcomes with inputs.
pub trait BatchItem {
    fn identifier(&self) -> String;
}

impl BatchItem for String {
    fn identifier(&self) -> String {
        self.clone()
    }
}

/// Outcome of one unit of work within a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemResult<T> {
    /// The identifier the caller submitted (token, not resolved ID)
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> BatchItemResult<T> {
    pub fn succeeded(identifier: String, internal_id: Option<String>, payload: T) -> Self {
        Self {
            identifier,
            internal_id,
            success: true,
            error: None,
            payload: Some(payload),
        }
    }

    pub fn failed(identifier: String, error: &ApiError) -> Self {
        Self {
            identifier,
            internal_id: None,
            success: false,
            error: Some(error.item_message()),
            payload: None,
        }
    }

    /// Attach the resolved internal ID once known. Callers that resolve
    /// before mutating use this to annotate results either way.
    pub fn with_internal_id(mut self, internal_id: Option<String>) -> Self {
        self.internal_id = internal_id;
        self
    }

    /// Drop the payload and convert to any payload type. Lets a
    /// resolution-phase failure travel into a mutation-phase result list.
    pub fn into_retyped<U>(self) -> BatchItemResult<U> {
        BatchItemResult {
            identifier: self.identifier,
            internal_id: self.internal_id,
            success: self.success,
            error: self.error,
            payload: None,
        }
    }
}

/// Run `work` for every item concurrently and return one result per item.
///
/// Failures are converted to failure results at the item boundary; a panic
/// inside `work` is caught at the task join and surfaced the same way. The
/// call never returns early and never drops an item. Results come back in
/// input order, though completion order is unspecified.
///
/// The runner does not deduplicate items; that hygiene belongs to the caller.
pub async fn run_batch<I, T, F, Fut>(
    items: Vec<I>,
    config: &BatchConfig,
    work: F,
) -> Vec<BatchItemResult<T>>
where
    I: BatchItem + Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }
    debug!(total, max_concurrency = config.max_concurrency, "batch started");

    let work = Arc::new(work);
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));

    let mut handles = Vec::with_capacity(total);
    for item in items {
        let identifier = item.identifier();
        let work = Arc::clone(&work);
        let semaphore = Arc::clone(&semaphore);
        let task_identifier = identifier.clone();
        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return BatchItemResult::failed(
                        task_identifier,
                        &ApiError::UnknownFailure("batch worker pool closed".to_string()),
                    );
                }
            };
            match work(item).await {
                Ok(payload) => BatchItemResult::succeeded(task_identifier, None, payload),
                Err(e) => BatchItemResult::failed(task_identifier, &e),
            }
        });
        handles.push((identifier, handle));
    }

    // Join barrier: every spawned item yields exactly one result. A JoinError
    // here means the work panicked; that stays confined to its own slot.
    let mut results = Vec::with_capacity(total);
    for (identifier, handle) in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(join_err) => {
                warn!(identifier = %identifier, error = %join_err, "batch item panicked");
                results.push(BatchItemResult::failed(
                    identifier,
                    &ApiError::UnknownFailure(format!("task aborted: {}", join_err)),
                ));
            }
        }
    }
    debug!(total = results.len(), "batch finished");
    results
}

/// Reduction of a full batch into caller-facing counts
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary<T> {
    pub total_requested: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// The runner's output, unmodified and unabridged
    pub results: Vec<BatchItemResult<T>>,
}

/// Reduce per-item results into a summary. An empty batch is valid and
/// yields all-zero counts.
pub fn aggregate<T>(results: Vec<BatchItemResult<T>>) -> BatchSummary<T> {
    let success_count = results.iter().filter(|r| r.success).count();
    BatchSummary {
        total_requested: results.len(),
        success_count,
        failed_count: results.len() - success_count,
        results,
    }
}
