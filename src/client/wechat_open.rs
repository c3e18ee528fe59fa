//! Unified WeChat Official Account client

use std::sync::Arc;

use crate::api::material::{MaterialApi, MaterialCounts, MaterialKind};
use crate::api::menu::{MenuApi, MenuButton, MenuDefinition};
use crate::api::tag::{TagApi, TagInfo, TagMembersResponse};
use crate::api::user::{FollowerInfo, FollowerListResponse, UserApi};
use crate::api::ApiContext;
use crate::error::WechatError;
use crate::types::{AppId, ResponseEnvelope};

/// Unified Official Account client
///
/// This is the main entry point for the SDK. Every endpoint is exposed as
/// an explicit method delegating to its API group; all of them run through
/// the shared token-aware request pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use wechat_open_sdk::WechatOpen;
/// use wechat_open_sdk::types::{AppId, AppSecret};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let wechat = WechatOpen::builder()
///         .appid(AppId::new("wx1234567890abcdef")?)
///         .secret(AppSecret::new("your_secret")?)
///         .build()?;
///
///     let tag = wechat.create_tag("vip").await?;
///     println!("tag id: {}", tag.id);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct WechatOpen {
    context: Arc<ApiContext>,
    appid: AppId,
}

impl WechatOpen {
    pub fn builder() -> super::builder::WechatOpenBuilder {
        super::builder::WechatOpenBuilder::default()
    }

    pub(crate) fn new(context: Arc<ApiContext>, appid: AppId) -> Self {
        Self { context, appid }
    }

    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    /// Current access token, acquiring one on first use.
    pub async fn access_token(&self) -> Result<String, WechatError> {
        self.context.credentials().token(false).await
    }

    /// Force a refresh and return the replacement token.
    pub async fn refresh_access_token(&self) -> Result<String, WechatError> {
        self.context.credentials().token(true).await
    }

    // Tag API

    pub async fn create_tag(&self, name: &str) -> Result<TagInfo, WechatError> {
        TagApi::new(self.context.clone()).create(name).await
    }

    pub async fn tags(&self) -> Result<Vec<TagInfo>, WechatError> {
        TagApi::new(self.context.clone()).list().await
    }

    pub async fn update_tag(
        &self,
        tag_id: i64,
        name: &str,
    ) -> Result<ResponseEnvelope, WechatError> {
        TagApi::new(self.context.clone()).update(tag_id, name).await
    }

    pub async fn delete_tag(&self, tag_id: i64) -> Result<ResponseEnvelope, WechatError> {
        TagApi::new(self.context.clone()).delete(tag_id).await
    }

    pub async fn user_tags(&self, openid: &str) -> Result<Vec<i64>, WechatError> {
        TagApi::new(self.context.clone()).user_tags(openid).await
    }

    pub async fn users_of_tag(
        &self,
        tag_id: i64,
        next_openid: &str,
    ) -> Result<TagMembersResponse, WechatError> {
        TagApi::new(self.context.clone())
            .users_of_tag(tag_id, next_openid)
            .await
    }

    pub async fn batch_tag_users(
        &self,
        openids: &[&str],
        tag_id: i64,
    ) -> Result<ResponseEnvelope, WechatError> {
        TagApi::new(self.context.clone())
            .batch_tag(openids, tag_id)
            .await
    }

    pub async fn batch_untag_users(
        &self,
        openids: &[&str],
        tag_id: i64,
    ) -> Result<ResponseEnvelope, WechatError> {
        TagApi::new(self.context.clone())
            .batch_untag(openids, tag_id)
            .await
    }

    // User API

    pub async fn user_info(
        &self,
        openid: &str,
        lang: Option<&str>,
    ) -> Result<FollowerInfo, WechatError> {
        UserApi::new(self.context.clone()).info(openid, lang).await
    }

    pub async fn batch_user_info(
        &self,
        openids: &[&str],
    ) -> Result<Vec<FollowerInfo>, WechatError> {
        UserApi::new(self.context.clone()).batch_info(openids).await
    }

    pub async fn user_list(
        &self,
        next_openid: Option<&str>,
    ) -> Result<FollowerListResponse, WechatError> {
        UserApi::new(self.context.clone()).list(next_openid).await
    }

    pub async fn update_user_remark(
        &self,
        openid: &str,
        remark: &str,
    ) -> Result<ResponseEnvelope, WechatError> {
        UserApi::new(self.context.clone())
            .update_remark(openid, remark)
            .await
    }

    // Menu API

    pub async fn create_menu(
        &self,
        buttons: &[MenuButton],
    ) -> Result<ResponseEnvelope, WechatError> {
        MenuApi::new(self.context.clone()).create(buttons).await
    }

    pub async fn current_menu(&self) -> Result<MenuDefinition, WechatError> {
        MenuApi::new(self.context.clone()).current().await
    }

    pub async fn delete_menu(&self) -> Result<ResponseEnvelope, WechatError> {
        MenuApi::new(self.context.clone()).delete().await
    }

    // Material API

    pub async fn material_counts(&self) -> Result<MaterialCounts, WechatError> {
        MaterialApi::new(self.context.clone()).stats().await
    }

    pub async fn list_materials(
        &self,
        kind: MaterialKind,
        offset: u64,
        count: u64,
    ) -> Result<ResponseEnvelope, WechatError> {
        MaterialApi::new(self.context.clone())
            .list(kind, offset, count)
            .await
    }

    pub async fn delete_material(&self, media_id: &str) -> Result<ResponseEnvelope, WechatError> {
        MaterialApi::new(self.context.clone()).delete(media_id).await
    }
}
