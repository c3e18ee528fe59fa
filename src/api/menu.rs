//! Custom account menu management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::r#trait::{ApiContext, OpenApi};
use crate::error::WechatError;
use crate::types::{RequestDescriptor, ResponseEnvelope};

const API_CREATE: &str = "/cgi-bin/menu/create";
const API_GET: &str = "/cgi-bin/menu/get";
const API_DELETE: &str = "/cgi-bin/menu/delete";

/// One entry in the account menu.
///
/// Top-level entries either carry an action (`kind` + `key`/`url`) or act
/// as a folder of `sub_button` entries, mirroring the upstream shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuButton {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_button: Vec<MenuButton>,
}

impl MenuButton {
    /// A `click` button pushing `key` to the message handler.
    pub fn click(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: Some("click".to_string()),
            name: name.into(),
            key: Some(key.into()),
            url: None,
            sub_button: Vec::new(),
        }
    }

    /// A `view` button opening `url`.
    pub fn view(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: Some("view".to_string()),
            name: name.into(),
            key: None,
            url: Some(url.into()),
            sub_button: Vec::new(),
        }
    }

    /// A folder entry holding nested buttons.
    pub fn folder(name: impl Into<String>, sub_button: Vec<MenuButton>) -> Self {
        Self {
            kind: None,
            name: name.into(),
            key: None,
            url: None,
            sub_button,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MenuResponse {
    menu: MenuDefinition,
}

/// The currently published menu.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub button: Vec<MenuButton>,
}

/// Menu API for the account's custom menu
pub struct MenuApi {
    context: Arc<ApiContext>,
}

impl MenuApi {
    pub fn new(context: Arc<ApiContext>) -> Self {
        Self { context }
    }

    /// Publish a menu, replacing the current one.
    pub async fn create(&self, buttons: &[MenuButton]) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::post_json(API_CREATE, &json!({ "button": buttons }))?;
        self.context.pipeline.execute(&descriptor).await
    }

    /// Fetch the currently published menu.
    pub async fn current(&self) -> Result<MenuDefinition, WechatError> {
        let descriptor = RequestDescriptor::get(API_GET);
        let response: MenuResponse =
            self.context.pipeline.execute(&descriptor).await?.decode()?;
        Ok(response.menu)
    }

    /// Remove the published menu.
    pub async fn delete(&self) -> Result<ResponseEnvelope, WechatError> {
        let descriptor = RequestDescriptor::get(API_DELETE);
        self.context.pipeline.execute(&descriptor).await
    }
}

impl OpenApi for MenuApi {
    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "menu"
    }
}
