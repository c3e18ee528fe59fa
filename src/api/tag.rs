//! Follower tag management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::r#trait::{ApiContext, OpenApi};
use crate::error::WechatError;
use crate::types::{RequestDescriptor, ResponseEnvelope};

const API_CREATE: &str = "/cgi-bin/tags/create";
const API_GET: &str = "/cgi-bin/tags/get";
const API_UPDATE: &str = "/cgi-bin/tags/update";
const API_DELETE: &str = "/cgi-bin/tags/delete";
const API_USER_TAGS: &str = "/cgi-bin/tags/getidlist";
const API_USERS_OF_TAG: &str = "/cgi-bin/user/tag/get";
const API_BATCH_TAG: &str = "/cgi-bin/tags/members/batchtagging";
const API_BATCH_UNTAG: &str = "/cgi-bin/tags/members/batchuntagging";

/// A follower tag as reported by the platform.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagInfo {
    pub id: i64,
    pub name: String,
    /// Number of followers carrying this tag.
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
struct TagListResponse {
    tags: Vec<TagInfo>,
}

#[derive(Debug, Deserialize)]
struct CreatedTagResponse {
    tag: TagInfo,
}

#[derive(Debug, Deserialize)]
struct TagIdListResponse {
    tagid_list: Vec<i64>,
}

/// Page of followers carrying one tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TagMembersResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub data: TagMemberData,
    #[serde(default)]
    pub next_openid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagMemberData {
    #[serde(default)]
    pub openid: Vec<String>,
}

/// Tag API for grouping followers
pub struct TagApi {
    context: Arc<ApiContext>,
}

impl TagApi {
    pub fn new(context: Arc<ApiContext>) -> Self {
        Self { context }
    }

    /// Create a tag.
    pub async fn create(&self, name: &str) -> Result<TagInfo, WechatError> {
        let descriptor =
            RequestDescriptor::post_json(API_CREATE, &json!({ "tag": { "name": name } }))?;
        let created: CreatedTagResponse =
            self.context.pipeline.execute(&descriptor).await?.decode()?;
        Ok(created.tag)
    }

    /// List all tags.
    pub async fn list(&self) -> Result<Vec<TagInfo>, WechatError> {
        let descriptor = RequestDescriptor::get(API_GET);
        let list: TagListResponse = self.context.pipeline.execute(&descriptor).await?.decode()?;
        Ok(list.tags)
    }

    /// Rename a tag.
    pub async fn update(&self, tag_id: i64, name: &str) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::post_json(
            API_UPDATE,
            &json!({ "tag": { "id": tag_id, "name": name } }),
        )?;
        self.context.pipeline.execute(&descriptor).await
    }

    /// Delete a tag.
    pub async fn delete(&self, tag_id: i64) -> Result<ResponseEnvelope, WechatError> {
        let descriptor =
            RequestDescriptor::post_json(API_DELETE, &json!({ "tag": { "id": tag_id } }))?;
        self.context.pipeline.execute(&descriptor).await
    }

    /// Tags attached to one follower.
    pub async fn user_tags(&self, openid: &str) -> Result<Vec<i64>, WechatError> {
        let descriptor =
            RequestDescriptor::post_json(API_USER_TAGS, &json!({ "openid": openid }))?;
        let ids: TagIdListResponse =
            self.context.pipeline.execute(&descriptor).await?.decode()?;
        Ok(ids.tagid_list)
    }

    /// Followers carrying a tag, paginated by `next_openid`.
    pub async fn users_of_tag(
        &self,
        tag_id: i64,
        next_openid: &str,
    ) -> Result<TagMembersResponse, WechatError> {
        let descriptor = RequestDescriptor::post_json(
            API_USERS_OF_TAG,
            &json!({ "tagid": tag_id, "next_openid": next_openid }),
        )?;
        self.context.pipeline.execute(&descriptor).await?.decode()
    }

    /// Attach a tag to a batch of followers.
    pub async fn batch_tag(
        &self,
        openids: &[&str],
        tag_id: i64,
    ) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::post_json(
            API_BATCH_TAG,
            &json!({ "openid_list": openids, "tagid": tag_id }),
        )?;
        self.context.pipeline.execute(&descriptor).await
    }

    /// Detach a tag from a batch of followers.
    pub async fn batch_untag(
        &self,
        openids: &[&str],
        tag_id: i64,
    ) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::post_json(
            API_BATCH_UNTAG,
            &json!({ "openid_list": openids, "tagid": tag_id }),
        )?;
        self.context.pipeline.execute(&descriptor).await
    }
}

impl OpenApi for TagApi {
    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "tag"
    }
}
