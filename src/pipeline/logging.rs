//! Observability hooks for the request pipeline.

use http::{HeaderMap, Method};
use reqwest::Url;

/// Receives one debug line per pipeline event.
///
/// Configured on the pipeline instance rather than read from global state.
/// The default forwards to the `log` facade, which stays silent until the
/// host application installs a logger.
pub trait RequestLog: Send + Sync {
    /// An attempt is about to go on the wire.
    fn request(&self, method: &Method, url: &Url, headers: &HeaderMap);

    /// A stale credential was replaced; the attempt repeats against `url`.
    fn retry(&self, token: &str, url: &Url);
}

/// Default sink writing through the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLog;

impl RequestLog for DebugLog {
    fn request(&self, method: &Method, url: &Url, headers: &HeaderMap) {
        log::debug!("Request: {method} {url}");
        log::debug!("Request headers: {headers:?}");
    }

    fn retry(&self, token: &str, url: &Url) {
        log::debug!("Retry with request token: {token}");
        log::debug!("Retry with request uri: {url}");
    }
}
