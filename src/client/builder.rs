use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::api::ApiContext;
use crate::error::{TransportError, WechatError};
use crate::language::{ErrorCatalog, MessageTranslator};
use crate::pipeline::{DebugLog, RequestLog, RequestPipeline};
use crate::token::{AccessTokenStore, ClientCredentialProvider, TokenProvider};
use crate::transport::{HttpTransport, Transport};
use crate::types::{AppId, AppSecret};

use super::WechatOpen;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_TOKEN_QUERY_NAME: &str = "access_token";
pub(crate) const DEFAULT_LOCALE: &str = "zh_cn";

/// Builder for [`WechatOpen`].
///
/// Every collaborator on the pipeline (transport, token authority,
/// translator, log sink) can be swapped; the defaults reproduce the stock
/// client against the production endpoint.
#[must_use]
#[derive(Default)]
pub struct WechatOpenBuilder {
    appid: Option<AppId>,
    secret: Option<AppSecret>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    locale: Option<String>,
    token_query_name: Option<String>,
    provider: Option<Arc<dyn TokenProvider>>,
    transport: Option<Arc<dyn Transport>>,
    translator: Option<Arc<dyn MessageTranslator>>,
    log: Option<Arc<dyn RequestLog>>,
}

impl std::fmt::Debug for WechatOpenBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatOpenBuilder")
            .field("appid", &self.appid)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("locale", &self.locale)
            .field("token_query_name", &self.token_query_name)
            .finish_non_exhaustive()
    }
}

impl WechatOpenBuilder {
    /// Set the account AppID
    pub fn appid(mut self, appid: AppId) -> Self {
        self.appid = Some(appid);
        self
    }

    /// Set the account AppSecret
    pub fn secret(mut self, secret: AppSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Set the base URL for API calls
    ///
    /// Default: `<https://api.weixin.qq.com>`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Locale used when localizing upstream error messages.
    ///
    /// Default: `zh_cn`
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Query field name carrying the access token.
    ///
    /// Default: `access_token`
    pub fn token_query_name(mut self, name: impl Into<String>) -> Self {
        self.token_query_name = Some(name.into());
        self
    }

    /// Replace the token-issuing authority.
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the network transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the error-message translator.
    pub fn translator(mut self, translator: Arc<dyn MessageTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Replace the request log sink.
    pub fn request_log(mut self, log: Arc<dyn RequestLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns an error if appid or secret is not set, or if the base URL
    /// is not an http(s) URL.
    pub fn build(self) -> Result<WechatOpen, WechatError> {
        let appid = self
            .appid
            .ok_or_else(|| WechatError::Config("appid is required".to_string()))?;
        let secret = self
            .secret
            .ok_or_else(|| WechatError::Config("secret is required".to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WechatError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(TransportError::from)?;

        let provider = self.provider.unwrap_or_else(|| {
            Arc::new(ClientCredentialProvider::new(
                http.clone(),
                base_url.clone(),
                appid.clone(),
                secret.clone(),
            ))
        });
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new(http)));
        let translator = self
            .translator
            .unwrap_or_else(|| Arc::new(ErrorCatalog));
        let log = self.log.unwrap_or_else(|| Arc::new(DebugLog));

        let credentials = Arc::new(AccessTokenStore::with_query_name(
            provider,
            self.token_query_name
                .unwrap_or_else(|| DEFAULT_TOKEN_QUERY_NAME.to_string()),
        ));

        let pipeline = RequestPipeline::new(
            transport,
            credentials,
            translator,
            log,
            base_url,
            self.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        );

        let context = Arc::new(ApiContext::new(Arc::new(pipeline)));

        Ok(WechatOpen::new(context, appid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default_values() {
        let appid = AppId::new("wx1234567890abcdef").unwrap();
        let secret = AppSecret::new("secret1234567890ab").unwrap();

        let wechat = WechatOpen::builder()
            .appid(appid.clone())
            .secret(secret)
            .build()
            .unwrap();

        assert_eq!(wechat.appid(), appid.as_str());
    }

    #[test]
    fn test_builder_custom_values() {
        let appid = AppId::new("wx1234567890abcdef").unwrap();
        let secret = AppSecret::new("secret1234567890ab").unwrap();

        let wechat = WechatOpen::builder()
            .appid(appid)
            .secret(secret)
            .base_url("https://custom.api.example.com")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .locale("en")
            .token_query_name("authorizer_access_token")
            .build()
            .unwrap();

        assert_eq!(wechat.appid(), "wx1234567890abcdef");
    }

    #[test]
    fn test_missing_appid() {
        let secret = AppSecret::new("secret1234567890ab").unwrap();

        let result = WechatOpen::builder().secret(secret).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_secret() {
        let appid = AppId::new("wx1234567890abcdef").unwrap();

        let result = WechatOpen::builder().appid(appid).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url_scheme() {
        let appid = AppId::new("wx1234567890abcdef").unwrap();
        let secret = AppSecret::new("secret1234567890ab").unwrap();

        let result = WechatOpen::builder()
            .appid(appid)
            .secret(secret)
            .base_url("ftp://api.example.com")
            .build();

        assert!(matches!(result, Err(WechatError::Config(_))));
    }
}
