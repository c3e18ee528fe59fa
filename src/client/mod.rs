//! Client entry points
//!
//! This module contains the builder and the unified facade.

mod builder;
pub use builder::WechatOpenBuilder;

mod wechat_open;
pub use wechat_open::WechatOpen;
