use thiserror::Error;

/// Transport-level failures raised below the request pipeline.
///
/// These propagate to the caller as-is: the pipeline only retries on
/// credential-expiry codes reported inside a decoded body, never on a
/// connection that failed to produce one.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}

/// WeChat SDK error types
#[derive(Debug, Error)]
pub enum WechatError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WeChat API error (code={code}): {message}")]
    Api { code: i32, message: String },

    #[error("access token unavailable: {0}")]
    Credential(String),

    #[error("configuration error: {0}")]
    Config(String),
}
