//! WeChat Official Account SDK for Rust
//!
//! A Rust SDK for the WeChat Open Platform / Official Account server-side
//! APIs. Endpoint calls run through a token-aware request pipeline that
//! attaches the access token as a query parameter, watches responses for
//! the platform's credential-expiry codes, refreshes the token, and retries
//! within a bounded ceiling.
//!
//! ## API Coverage
//!
//! | Category | Endpoints |
//! |----------|-----------|
//! | Follower Tags | 8 |
//! | Followers | 4 |
//! | Custom Menu | 3 |
//! | Materials | 3 |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wechat_open_sdk::{WechatOpen, types::{AppId, AppSecret}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wechat = WechatOpen::builder()
//!         .appid(AppId::new("wx1234567890abcdef")?)
//!         .secret(AppSecret::new("your_secret")?)
//!         .build()?;
//!
//!     let tag = wechat.create_tag("vip").await?;
//!     println!("created tag {} ({})", tag.name, tag.id);
//!
//!     for tag in wechat.tags().await? {
//!         println!("{}: {} followers", tag.name, tag.count);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Endpoint groups (tags, users, menus, materials)
//! - [`client`] - Builder and unified facade
//! - [`pipeline`] - Token-aware request pipeline
//! - [`token`] - Access token lifecycle
//! - [`transport`] - Network transport seam
//! - [`language`] - Error-message localization
//! - [`error`] - Error types
//! - [`types`] - Request descriptors, envelopes, typed ids
//!
//! ## Error Handling
//!
//! The SDK uses the [`WechatError`] enum for error handling:
//!
//! ```rust,ignore
//! use wechat_open_sdk::WechatError;
//!
//! match result {
//!     Ok(envelope) => { /* handle success */ }
//!     Err(WechatError::Api { code, message }) => {
//!         eprintln!("API error: {} - {}", code, message);
//!     }
//!     Err(WechatError::Transport(e)) => {
//!         eprintln!("transport error: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod token;
pub mod transport;
pub mod types;

pub use client::{WechatOpen, WechatOpenBuilder};
pub use error::{TransportError, WechatError};
