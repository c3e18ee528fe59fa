//! Access token lifecycle for WeChat API
//!
//! Handles token storage, forced refresh, and concurrency safety.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::WechatError;
use crate::types::{AccessToken, AppId, AppSecret};

pub type ProviderFuture<'a> =
    Pin<Box<dyn Future<Output = Result<IssuedCredential, WechatError>> + Send + 'a>>;

/// A credential as handed out by the token-issuing authority.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: AccessToken,
    pub expires_in: Option<Duration>,
}

/// Upstream token-issuing authority.
///
/// Failures surface as [`WechatError::Credential`] and must leave any
/// previously stored credential untouched.
pub trait TokenProvider: Send + Sync {
    fn refresh(&self) -> ProviderFuture<'_>;
}

struct StoredCredential {
    token: AccessToken,
    expires_at: Option<Instant>,
}

/// Holds the current access token and coordinates refreshes.
///
/// Refresh is reactive: nothing here watches the stored expiry. The request
/// pipeline asks for a forced refresh when the upstream reports a stale
/// credential. Concurrent forced refreshes collapse into a single provider
/// call: a generation counter read before the lock tells late arrivals
/// that someone already replaced the token they saw fail.
pub struct AccessTokenStore {
    provider: Arc<dyn TokenProvider>,
    query_name: String,
    credential: Mutex<Option<StoredCredential>>,
    generation: AtomicU64,
}

impl std::fmt::Debug for AccessTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenStore")
            .field("query_name", &self.query_name)
            .finish_non_exhaustive()
    }
}

impl AccessTokenStore {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self::with_query_name(provider, "access_token")
    }

    pub fn with_query_name(
        provider: Arc<dyn TokenProvider>,
        query_name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            query_name: query_name.into(),
            credential: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// URL query field carrying the token.
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// Returns the current token, refreshing first when `force_refresh` is
    /// set or no credential is held yet.
    pub async fn token(&self, force_refresh: bool) -> Result<String, WechatError> {
        let observed = self.generation.load(Ordering::Acquire);
        let mut slot = self.credential.lock().await;

        if let Some(stored) = slot.as_ref() {
            let refreshed_meanwhile = self.generation.load(Ordering::Acquire) != observed;
            if !force_refresh || refreshed_meanwhile {
                return Ok(stored.token.as_str().to_string());
            }
        }

        let issued = self.provider.refresh().await?;
        let token = issued.token.as_str().to_string();
        *slot = Some(StoredCredential {
            token: issued.token,
            expires_at: issued.expires_in.map(|ttl| Instant::now() + ttl),
        });
        self.generation.fetch_add(1, Ordering::Release);

        Ok(token)
    }

    /// Expiry instant the authority reported for the stored credential.
    /// Observability only; never drives a refresh.
    pub async fn expires_at(&self) -> Option<Instant> {
        self.credential
            .lock()
            .await
            .as_ref()
            .and_then(|stored| stored.expires_at)
    }
}

/// Default authority: the `client_credential` grant on the platform's
/// token endpoint.
pub struct ClientCredentialProvider {
    http: reqwest::Client,
    base_url: String,
    appid: AppId,
    secret: AppSecret,
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    errcode: i32,
    #[serde(default)]
    errmsg: String,
}

impl ClientCredentialProvider {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        appid: AppId,
        secret: AppSecret,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            appid,
            secret,
        }
    }

    async fn fetch(&self) -> Result<IssuedCredential, WechatError> {
        let url = format!("{}/cgi-bin/token", self.base_url);
        let query = [
            ("grant_type", "client_credential"),
            ("appid", self.appid.as_str()),
            ("secret", self.secret.as_str()),
        ];

        let grant: TokenGrant = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WechatError::Credential(format!("token request failed: {e}")))?
            .json()
            .await
            .map_err(|e| WechatError::Credential(format!("token response malformed: {e}")))?;

        if grant.errcode != 0 {
            return Err(WechatError::Credential(format!(
                "token grant rejected (code={}): {}",
                grant.errcode, grant.errmsg
            )));
        }

        let token = AccessToken::new(grant.access_token).map_err(WechatError::Credential)?;

        Ok(IssuedCredential {
            token,
            expires_in: grant.expires_in.map(Duration::from_secs),
        })
    }
}

impl TokenProvider for ClientCredentialProvider {
    fn refresh(&self) -> ProviderFuture<'_> {
        Box::pin(self.fetch())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    struct SequenceProvider {
        tokens: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl SequenceProvider {
        fn new(tokens: Vec<&'static str>) -> Self {
            Self {
                tokens,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TokenProvider for SequenceProvider {
        fn refresh(&self) -> ProviderFuture<'_> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            let token = self.tokens.get(index).copied();
            Box::pin(async move {
                match token {
                    Some(token) => Ok(IssuedCredential {
                        token: AccessToken::new(token).unwrap(),
                        expires_in: Some(Duration::from_secs(7200)),
                    }),
                    None => Err(WechatError::Credential("authority exhausted".to_string())),
                }
            })
        }
    }

    #[tokio::test]
    async fn test_initial_read_acquires_token() {
        let provider = Arc::new(SequenceProvider::new(vec!["t1"]));
        let store = AccessTokenStore::new(Arc::clone(&provider) as Arc<dyn TokenProvider>);

        assert_eq!(store.token(false).await.unwrap(), "t1");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cached_read_skips_provider() {
        let provider = Arc::new(SequenceProvider::new(vec!["t1", "t2"]));
        let store = AccessTokenStore::new(Arc::clone(&provider) as Arc<dyn TokenProvider>);

        assert_eq!(store.token(false).await.unwrap(), "t1");
        assert_eq!(store.token(false).await.unwrap(), "t1");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_forced_refresh_replaces_token() {
        let provider = Arc::new(SequenceProvider::new(vec!["t1", "t2"]));
        let store = AccessTokenStore::new(Arc::clone(&provider) as Arc<dyn TokenProvider>);

        assert_eq!(store.token(false).await.unwrap(), "t1");
        assert_eq!(store.token(true).await.unwrap(), "t2");
        assert_eq!(store.token(false).await.unwrap(), "t2");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_token() {
        let provider = Arc::new(SequenceProvider::new(vec!["t1"]));
        let store = AccessTokenStore::new(Arc::clone(&provider) as Arc<dyn TokenProvider>);

        assert_eq!(store.token(false).await.unwrap(), "t1");

        let err = store.token(true).await.unwrap_err();
        assert!(matches!(err, WechatError::Credential(_)));

        assert_eq!(store.token(false).await.unwrap(), "t1");
    }

    #[tokio::test]
    async fn test_expiry_recorded_for_observability() {
        let provider = Arc::new(SequenceProvider::new(vec!["t1"]));
        let store = AccessTokenStore::new(Arc::clone(&provider) as Arc<dyn TokenProvider>);

        assert!(store.expires_at().await.is_none());
        store.token(false).await.unwrap();
        assert!(store.expires_at().await.is_some());
    }

    #[tokio::test]
    async fn test_custom_query_name() {
        let provider = Arc::new(SequenceProvider::new(vec!["t1"]));
        let store = AccessTokenStore::with_query_name(
            provider as Arc<dyn TokenProvider>,
            "component_access_token",
        );

        assert_eq!(store.query_name(), "component_access_token");
    }
}
