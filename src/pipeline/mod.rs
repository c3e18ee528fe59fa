//! The access-token-aware request pipeline.
//!
//! One logical call moves through a fixed sequence of stages: attach the
//! current credential as a query parameter, send over the transport,
//! classify the body against the errcode convention, and either return the
//! decoded envelope, fail with a typed error, or force a credential refresh
//! and retry within a bounded ceiling. The stage order is fixed; this is a
//! finite state machine, not an open middleware chain.

mod classify;
mod logging;

pub use logging::{DebugLog, RequestLog};

use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Url;

use crate::error::WechatError;
use crate::language::MessageTranslator;
use crate::token::AccessTokenStore;
use crate::transport::{OutboundRequest, Transport};
use crate::types::{RequestDescriptor, ResponseEnvelope};

use classify::{classify, Outcome};

/// Retries allowed beyond the first attempt of one logical call.
const MAX_TOKEN_RETRIES: u32 = 2;

/// Characters that must be encoded in query parameter values.
/// Includes: space, &, =, %, +, #, and control characters.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'&')
    .add(b'=')
    .add(b'%')
    .add(b'+')
    .add(b'#');

/// Executes logical API calls against one account's credential.
///
/// Shared across endpoint callers; each [`execute`](Self::execute) runs on
/// the caller's task and resolves once the call reaches a terminal state.
pub struct RequestPipeline {
    transport: Arc<dyn Transport>,
    credentials: Arc<AccessTokenStore>,
    translator: Arc<dyn MessageTranslator>,
    log: Arc<dyn RequestLog>,
    base_url: String,
    locale: String,
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("base_url", &self.base_url)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl RequestPipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<AccessTokenStore>,
        translator: Arc<dyn MessageTranslator>,
        log: Arc<dyn RequestLog>,
        base_url: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            translator,
            log,
            base_url: base_url.into(),
            locale: locale.into(),
        }
    }

    pub fn credentials(&self) -> &Arc<AccessTokenStore> {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs one logical call to completion.
    ///
    /// # Errors
    /// - [`WechatError::Transport`] when the wire attempt itself fails
    /// - [`WechatError::Credential`] when a forced refresh fails
    /// - [`WechatError::Api`] for non-zero upstream codes, including a
    ///   stale-credential code that survives the retry ceiling
    /// - [`WechatError::Json`] when a success body does not decode
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ResponseEnvelope, WechatError> {
        let body = match descriptor.payload() {
            Some(payload) => Some(serde_json::to_string(payload)?),
            None => None,
        };

        let mut token = self.credentials.token(false).await?;
        let mut retries: u32 = 0;

        loop {
            let url = self.authorized_url(descriptor, &token)?;
            let headers = headers_for(descriptor);
            self.log.request(descriptor.method(), &url, &headers);

            let response = self
                .transport
                .send(OutboundRequest {
                    method: descriptor.method().clone(),
                    url,
                    headers,
                    body: body.clone(),
                })
                .await?;

            match classify(&response.body) {
                Outcome::Ok => return ResponseEnvelope::from_body(&response.body),
                Outcome::Failed { code, message } => {
                    return Err(self.api_error(code, &message));
                }
                Outcome::StaleCredential { code, message } => {
                    if retries >= MAX_TOKEN_RETRIES {
                        return Err(self.api_error(code, &message));
                    }
                    retries += 1;
                    token = self.credentials.token(true).await?;
                    let next_url = self.authorized_url(descriptor, &token)?;
                    self.log.retry(&token, &next_url);
                }
            }
        }
    }

    fn api_error(&self, code: i32, message: &str) -> WechatError {
        WechatError::Api {
            code,
            message: self.translator.translate(code, message, &self.locale),
        }
    }

    /// Derives the attempt URL: base + path + caller query, with the token
    /// appended under the store's configured field name.
    fn authorized_url(
        &self,
        descriptor: &RequestDescriptor,
        token: &str,
    ) -> Result<Url, WechatError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, descriptor.path()))
            .map_err(|e| WechatError::Config(format!("invalid request URL: {e}")))?;

        if !descriptor.query_params().is_empty() {
            url.query_pairs_mut().extend_pairs(
                descriptor
                    .query_params()
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }

        let field = self.credentials.query_name();
        let encoded = utf8_percent_encode(token, QUERY_VALUE_ENCODE_SET);
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{field}={encoded}"),
            _ => format!("{field}={encoded}"),
        };
        url.set_query(Some(&query));

        Ok(url)
    }
}

fn headers_for(descriptor: &RequestDescriptor) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if descriptor.payload().is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    headers
}
