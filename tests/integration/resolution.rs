//! Identifier resolution against the API double: fast path, single lookup,
//! and local rejection of malformed tokens.

use crate::integration::test_utils::{issue, MockIssueApi};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use trak::error::ApiError;
use trak::identifier::IdentifierResolver;

const OPAQUE: &str = "a1b2c3d4-e5f6-7890-abcd-ef0123456789";

#[tokio::test]
async fn test_opaque_token_skips_the_network() {
    let api = Arc::new(MockIssueApi::new());
    let resolver = IdentifierResolver::new(api.clone());

    let resolved = resolver.resolve(OPAQUE).await.unwrap();
    assert_eq!(resolved, OPAQUE);
    assert_eq!(api.lookup_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_composite_key_costs_exactly_one_lookup() {
    let api = Arc::new(MockIssueApi::new().with_issue("ENG", 123, issue(OPAQUE, "ENG-123", &[])));
    let resolver = IdentifierResolver::new(api.clone());

    let resolved = resolver.resolve("eng-123").await.unwrap();
    assert_eq!(resolved, OPAQUE);
    assert_eq!(api.lookup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_composite_key_is_not_found() {
    let api = Arc::new(MockIssueApi::new());
    let resolver = IdentifierResolver::new(api.clone());

    match resolver.resolve("ENG-999").await {
        Err(ApiError::NotFound(key)) => assert_eq!(key, "ENG-999"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(api.lookup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_token_never_reaches_the_network() {
    let api = Arc::new(MockIssueApi::new());
    let resolver = IdentifierResolver::new(api.clone());

    match resolver.resolve("not-a-real-id").await {
        Err(ApiError::InvalidIdentifierFormat(_)) => {}
        other => panic!("expected InvalidIdentifierFormat, got {:?}", other),
    }
    assert_eq!(api.lookup_calls.load(Ordering::SeqCst), 0);
}
