//! Token store behavior across concurrent callers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use wechat_open_sdk::error::WechatError;
use wechat_open_sdk::token::{
    AccessTokenStore, IssuedCredential, ProviderFuture, TokenProvider,
};
use wechat_open_sdk::types::AccessToken;

/// Counts upstream calls and takes long enough that concurrent callers
/// pile up behind the refresh in flight.
struct SlowCountingProvider {
    calls: AtomicUsize,
}

impl SlowCountingProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenProvider for SlowCountingProvider {
    fn refresh(&self) -> ProviderFuture<'_> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(IssuedCredential {
                token: AccessToken::new(format!("t{}", n + 1)).unwrap(),
                expires_in: Some(Duration::from_secs(7200)),
            })
        })
    }
}

/// N concurrent forced refreshes collapse into one upstream call.
#[tokio::test]
async fn test_concurrent_forced_refreshes_single_flight() {
    let provider = Arc::new(SlowCountingProvider::new());
    let store = Arc::new(AccessTokenStore::new(
        Arc::clone(&provider) as Arc<dyn TokenProvider>
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.token(true).await })
        })
        .collect();

    let tokens: Vec<String> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(provider.call_count(), 1);
    assert!(tokens.iter().all(|token| token == "t1"));
}

/// Forced refreshes after a warm-up still collapse: one initial
/// acquisition plus one shared refresh.
#[tokio::test]
async fn test_forced_refresh_after_warmup_collapses() {
    let provider = Arc::new(SlowCountingProvider::new());
    let store = Arc::new(AccessTokenStore::new(
        Arc::clone(&provider) as Arc<dyn TokenProvider>
    ));

    assert_eq!(store.token(false).await.unwrap(), "t1");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.token(true).await })
        })
        .collect();

    let tokens: Vec<String> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(provider.call_count(), 2);
    assert!(tokens.iter().all(|token| token == "t2"));
}

/// Concurrent non-forced reads of a cold store also share one acquisition.
#[tokio::test]
async fn test_concurrent_initial_reads_single_flight() {
    let provider = Arc::new(SlowCountingProvider::new());
    let store = Arc::new(AccessTokenStore::new(
        Arc::clone(&provider) as Arc<dyn TokenProvider>
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.token(false).await })
        })
        .collect();

    for joined in join_all(handles).await {
        assert_eq!(joined.unwrap().unwrap(), "t1");
    }
    assert_eq!(provider.call_count(), 1);
}

struct FailingProvider;

impl TokenProvider for FailingProvider {
    fn refresh(&self) -> ProviderFuture<'_> {
        Box::pin(async {
            Err(WechatError::Credential(
                "authority unreachable".to_string(),
            ))
        })
    }
}

/// Refresh failures surface as credential errors and leave nothing stored.
#[tokio::test]
async fn test_refresh_failure_is_credential_error() {
    let store = AccessTokenStore::new(Arc::new(FailingProvider));

    let err = store.token(false).await.unwrap_err();
    assert!(matches!(err, WechatError::Credential(_)));

    // Still nothing cached: the next read asks the authority again.
    let err = store.token(false).await.unwrap_err();
    assert!(matches!(err, WechatError::Credential(_)));
}
