//! Response cache expiry and read-through tests.
//!
//! Timing tests run on a paused clock so expiry is deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use cycleapi::{ApiResponse, CycleError, ErrorDetail, OptionSet, ResponseCache};
use serde_json::json;

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let cache = ResponseCache::new();
    cache.set("x", 1u32, OptionSet::empty(), None, Duration::from_millis(50));

    tokio::time::advance(Duration::from_millis(40)).await;
    assert_eq!(cache.get::<u32>("x", None, None), Some(1));

    tokio::time::advance(Duration::from_millis(20)).await;
    assert_eq!(cache.get::<u32>("x", None, None), None);
}

#[tokio::test(start_paused = true)]
async fn test_timer_removes_entry() {
    let cache = ResponseCache::new();
    cache.set("x", 1u32, OptionSet::empty(), None, Duration::from_millis(50));
    assert_eq!(cache.len(), 1);

    // The expiry task is due before this sleep ends
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_replaces_timer() {
    let cache = ResponseCache::new();
    cache.set("x", 1u32, OptionSet::empty(), None, Duration::from_millis(50));

    tokio::time::advance(Duration::from_millis(30)).await;
    cache.set("x", 2u32, OptionSet::empty(), None, Duration::from_millis(100));

    // First timer would have fired here
    tokio::time::advance(Duration::from_millis(30)).await;
    assert_eq!(cache.get::<u32>("x", None, None), Some(2));

    tokio::time::advance(Duration::from_millis(50)).await;
    assert_eq!(cache.get::<u32>("x", None, None), Some(2));

    tokio::time::advance(Duration::from_millis(30)).await;
    assert_eq!(cache.get::<u32>("x", None, None), None);
}

#[tokio::test(start_paused = true)]
async fn test_clear_cancels_expiry() {
    let cache = ResponseCache::new();
    cache.set("x", 1u32, OptionSet::empty(), None, Duration::from_millis(50));
    cache.clear("x");

    // Re-set with a longer TTL; the cleared entry's timer must not remove it
    cache.set("x", 2u32, OptionSet::empty(), None, Duration::from_millis(200));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(cache.get::<u32>("x", None, None), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_get_or_fetch_serves_cached_success() {
    let cache = ResponseCache::new();
    let counter = AtomicUsize::new(0);
    let calls = &counter;
    let options = OptionSet::from(json!({ "page": 1 }));

    for _ in 0..3 {
        let response = cache
            .get_or_fetch("k", options.clone(), Some("team-a"), Duration::from_millis(100), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CycleError>(ApiResponse::Success { document: 42u32 })
            })
            .await
            .unwrap();
        assert_eq!(response.into_document(), Some(42));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_millis(150)).await;
    cache
        .get_or_fetch("k", options, Some("team-a"), Duration::from_millis(100), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, CycleError>(ApiResponse::Success { document: 43u32 })
        })
        .await
        .unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_get_or_fetch_requires_exact_scope() {
    let cache = ResponseCache::new();
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    for scope in [Some("team-a"), Some("team-a"), None, None, Some("team-b")] {
        cache
            .get_or_fetch("k", OptionSet::empty(), scope, Duration::from_secs(60), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CycleError>(ApiResponse::Success { document: "v".to_string() })
            })
            .await
            .unwrap();
    }

    // Each change of scope refetches; repeats of the same scope hit
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_get_or_fetch_does_not_cache_failures() {
    let cache = ResponseCache::new();
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    for _ in 0..2 {
        let response = cache
            .get_or_fetch("k", OptionSet::empty(), None, Duration::from_secs(60), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CycleError>(ApiResponse::<u32>::Failure {
                    errors: vec![ErrorDetail {
                        status: Some("500".to_string()),
                        ..Default::default()
                    }],
                })
            })
            .await
            .unwrap();
        assert!(response.is_failure());
    }

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_get_or_fetch_propagates_errors() {
    let cache = ResponseCache::new();

    let result = cache
        .get_or_fetch("k", OptionSet::empty(), None, Duration::from_secs(60), || async {
            Err::<ApiResponse<u32>, _>(CycleError::InvalidArgument("boom".to_string()))
        })
        .await;

    assert!(matches!(result, Err(CycleError::InvalidArgument(_))));
    assert!(cache.is_empty());
}

#[test]
fn test_global_is_shared() {
    ResponseCache::global().set("shared-key", 5u8, OptionSet::empty(), None, Duration::from_secs(60));
    assert_eq!(ResponseCache::global().get::<u8>("shared-key", None, None), Some(5));
    ResponseCache::global().clear("shared-key");
    assert_eq!(ResponseCache::global().get::<u8>("shared-key", None, None), None);
}
