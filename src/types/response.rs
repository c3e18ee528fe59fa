//! The decoded response envelope.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::WechatError;

/// Decoded JSON body of a successful API call.
///
/// The upstream wraps every payload in a flat object that may carry
/// `errcode`/`errmsg` status fields next to the data itself. By the time an
/// envelope reaches the caller the pipeline has already established that
/// `errcode` is zero or absent.
#[derive(Debug, Clone, Default)]
pub struct ResponseEnvelope {
    fields: Map<String, Value>,
}

impl ResponseEnvelope {
    pub(crate) fn from_body(body: &str) -> Result<Self, WechatError> {
        let fields = serde_json::from_str(body)?;
        Ok(Self { fields })
    }

    /// Look up a single field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn errcode(&self) -> Option<i32> {
        self.fields
            .get("errcode")
            .and_then(Value::as_i64)
            .map(|code| i32::try_from(code).unwrap_or(i32::MAX))
    }

    pub fn errmsg(&self) -> Option<&str> {
        self.fields.get("errmsg").and_then(Value::as_str)
    }

    /// Deserialize the whole envelope into a typed response.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, WechatError> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}
