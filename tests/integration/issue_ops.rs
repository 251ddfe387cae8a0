//! Single-issue operations: view, update, and label reconciliation.

use crate::integration::test_utils::{issue, labels, MockIssueApi};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use trak::api::IssueUpdate;
use trak::error::ApiError;
use trak::ops;

const ID: &str = "a1b2c3d4-e5f6-7890-abcd-ef0123456789";

fn api() -> Arc<MockIssueApi> {
    Arc::new(MockIssueApi::new().with_issue("ENG", 42, issue(ID, "ENG-42", &["L1", "L2"])))
}

#[tokio::test]
async fn test_view_issue_by_key_and_by_id() {
    let api = api();

    let by_key = ops::view_issue(api.clone(), "ENG-42").await.unwrap();
    assert_eq!(by_key.id, ID);
    assert_eq!(by_key.key, "ENG-42");

    let by_id = ops::view_issue(api.clone(), ID).await.unwrap();
    assert_eq!(by_id.id, ID);
    // Only the composite lookup touched the resolver's network path
    assert_eq!(api.lookup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_update_issue_applies_fields() {
    let api = api();
    let update = IssueUpdate {
        state: Some("Done".to_string()),
        assignee: Some("casey".to_string()),
        ..IssueUpdate::default()
    };

    let updated = ops::update_issue(api.clone(), "ENG-42", update).await.unwrap();
    assert_eq!(updated.state.as_deref(), Some("Done"));
    assert_eq!(updated.assignee.as_deref(), Some("casey"));
}

#[tokio::test]
async fn test_update_issue_rejects_empty_update() {
    let api = api();
    match ops::update_issue(api, "ENG-42", IssueUpdate::default()).await {
        Err(ApiError::ConfigError(msg)) => assert!(msg.contains("Nothing to update")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_apply_labels_reports_effective_deltas() {
    let api = api();

    let outcome = ops::apply_labels(
        api.clone(),
        "ENG-42",
        labels(&["L2", "L3"]),
        labels(&["L1"]),
    )
    .await
    .unwrap();

    assert_eq!(outcome.added, labels(&["L3"]));
    assert_eq!(outcome.removed, labels(&["L1"]));
    assert_eq!(outcome.labels, labels(&["L2", "L3"]));
    assert_eq!(api.stored_issue(ID).unwrap().labels, labels(&["L2", "L3"]));
}

#[tokio::test]
async fn test_apply_labels_is_idempotent_against_updated_issue() {
    let api = api();
    let to_add = labels(&["L2", "L3"]);
    let to_remove = labels(&["L1"]);

    let first = ops::apply_labels(api.clone(), "ENG-42", to_add.clone(), to_remove.clone())
        .await
        .unwrap();
    let second = ops::apply_labels(api.clone(), "ENG-42", to_add, to_remove)
        .await
        .unwrap();

    assert_eq!(second.labels, first.labels);
    assert!(second.added.is_empty());
    // One real mutation; the second pass was a no-op and skipped the call
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_apply_labels_rejects_empty_request() {
    let api = api();
    match ops::apply_labels(api, "ENG-42", labels(&[]), labels(&[])).await {
        Err(ApiError::ConfigError(msg)) => assert!(msg.contains("Nothing to reconcile")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}
