//! Network transport seam for the request pipeline.
//!
//! The pipeline hands a fully derived request (credential already attached)
//! to a [`Transport`] and gets back the raw status, headers, and body text
//! for classification. Implementations own connection handling and
//! timeouts; the pipeline never retries a transport-level failure.

use std::future::Future;
use std::pin::Pin;

use http::{HeaderMap, Method, StatusCode};
use reqwest::{Client, Url};

use crate::error::TransportError;

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>>;

/// An outbound request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Raw wire response, exposed before any decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Executes prepared requests.
pub trait Transport: Send + Sync {
    fn send(&self, request: OutboundRequest) -> TransportFuture<'_>;
}

/// reqwest-backed transport used by the built client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: OutboundRequest) -> TransportFuture<'_> {
        let http = self.http.clone();
        Box::pin(async move {
            let mut builder = http
                .request(request.method, request.url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            response.error_for_status_ref()?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await?;

            Ok(RawResponse {
                status,
                headers,
                body,
            })
        })
    }
}
