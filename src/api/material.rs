//! Permanent material management.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::api::r#trait::{ApiContext, OpenApi};
use crate::error::WechatError;
use crate::types::{RequestDescriptor, ResponseEnvelope};

const API_COUNT: &str = "/cgi-bin/material/get_materialcount";
const API_LIST: &str = "/cgi-bin/material/batchget_material";
const API_DELETE: &str = "/cgi-bin/material/del_material";

/// Kind of permanent material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Image,
    Video,
    Voice,
    News,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::News => "news",
        }
    }
}

/// Stored material totals per kind.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialCounts {
    #[serde(default)]
    pub voice_count: u64,
    #[serde(default)]
    pub video_count: u64,
    #[serde(default)]
    pub image_count: u64,
    #[serde(default)]
    pub news_count: u64,
}

/// Material API for permanent assets
pub struct MaterialApi {
    context: Arc<ApiContext>,
}

impl MaterialApi {
    pub fn new(context: Arc<ApiContext>) -> Self {
        Self { context }
    }

    /// Totals of stored materials per kind.
    pub async fn stats(&self) -> Result<MaterialCounts, WechatError> {
        let descriptor = RequestDescriptor::get(API_COUNT);
        self.context.pipeline.execute(&descriptor).await?.decode()
    }

    /// Page through stored materials of one kind.
    ///
    /// `offset` is the item to start from, `count` the page size (upstream
    /// accepts 1..=20).
    pub async fn list(
        &self,
        kind: MaterialKind,
        offset: u64,
        count: u64,
    ) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::post_json(
            API_LIST,
            &json!({ "type": kind.as_str(), "offset": offset, "count": count }),
        )?;
        self.context.pipeline.execute(&descriptor).await
    }

    /// Delete one stored material.
    pub async fn delete(&self, media_id: &str) -> Result<ResponseEnvelope, WechatError> {
        let descriptor =
            RequestDescriptor::post_json(API_DELETE, &json!({ "media_id": media_id }))?;
        self.context.pipeline.execute(&descriptor).await
    }
}

impl OpenApi for MaterialApi {
    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "material"
    }
}
