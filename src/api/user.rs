//! Follower information and remarks.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::api::r#trait::{ApiContext, OpenApi};
use crate::error::WechatError;
use crate::types::{RequestDescriptor, ResponseEnvelope};

const API_INFO: &str = "/cgi-bin/user/info";
const API_BATCH_INFO: &str = "/cgi-bin/user/info/batchget";
const API_LIST: &str = "/cgi-bin/user/get";
const API_UPDATE_REMARK: &str = "/cgi-bin/user/info/updateremark";

/// A follower profile.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize)]
pub struct FollowerInfo {
    /// 1 when the user currently follows the account, 0 otherwise.
    #[serde(default)]
    pub subscribe: u8,
    pub openid: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub subscribe_time: Option<u64>,
    #[serde(default)]
    pub unionid: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub tagid_list: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct BatchInfoResponse {
    user_info_list: Vec<FollowerInfo>,
}

/// Page of follower openids.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowerListResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub data: FollowerIds,
    #[serde(default)]
    pub next_openid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FollowerIds {
    #[serde(default)]
    pub openid: Vec<String>,
}

/// User API for follower profiles
pub struct UserApi {
    context: Arc<ApiContext>,
}

impl UserApi {
    pub fn new(context: Arc<ApiContext>) -> Self {
        Self { context }
    }

    /// Fetch one follower's profile.
    ///
    /// `lang` selects the localization of profile fields, defaulting to
    /// `zh_CN` upstream when omitted.
    pub async fn info(
        &self,
        openid: &str,
        lang: Option<&str>,
    ) -> Result<FollowerInfo, WechatError> {
        let mut descriptor = RequestDescriptor::get(API_INFO).query("openid", openid);
        if let Some(lang) = lang {
            descriptor = descriptor.query("lang", lang);
        }
        self.context.pipeline.execute(&descriptor).await?.decode()
    }

    /// Fetch profiles for a batch of followers.
    pub async fn batch_info(&self, openids: &[&str]) -> Result<Vec<FollowerInfo>, WechatError> {
        let user_list: Vec<_> = openids
            .iter()
            .map(|openid| json!({ "openid": openid }))
            .collect();
        let descriptor =
            RequestDescriptor::post_json(API_BATCH_INFO, &json!({ "user_list": user_list }))?;
        let batch: BatchInfoResponse =
            self.context.pipeline.execute(&descriptor).await?.decode()?;
        Ok(batch.user_info_list)
    }

    /// Page through follower openids, starting after `next_openid`.
    pub async fn list(
        &self,
        next_openid: Option<&str>,
    ) -> Result<FollowerListResponse, WechatError> {
        let mut descriptor = RequestDescriptor::get(API_LIST);
        if let Some(next_openid) = next_openid {
            descriptor = descriptor.query("next_openid", next_openid);
        }
        self.context.pipeline.execute(&descriptor).await?.decode()
    }

    /// Set the account-side remark name for a follower.
    pub async fn update_remark(
        &self,
        openid: &str,
        remark: &str,
    ) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::post_json(
            API_UPDATE_REMARK,
            &json!({ "openid": openid, "remark": remark }),
        )?;
        self.context.pipeline.execute(&descriptor).await
    }
}

impl OpenApi for UserApi {
    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "user"
    }
}
