//! Request descriptors consumed by the pipeline.

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::WechatError;

/// One API call, described before credential attachment.
///
/// Descriptors are immutable once built. The pipeline derives the final URL
/// (base URL + path + query + token) fresh for every attempt, so a retry
/// with a refreshed credential never mutates the original descriptor.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    payload: Option<Value>,
}

impl RequestDescriptor {
    /// A GET call to `path` (e.g. `/cgi-bin/tags/get`).
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            payload: None,
        }
    }

    /// A POST call carrying `payload` as a JSON body.
    pub fn post_json<B: Serialize>(
        path: impl Into<String>,
        payload: &B,
    ) -> Result<Self, WechatError> {
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            payload: Some(serde_json::to_value(payload)?),
        })
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}
