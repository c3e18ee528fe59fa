//! WeChat Official Account API modules
//!
//! Each submodule groups one family of endpoints. Every endpoint is a thin
//! caller of the request pipeline: it marshals parameters into a
//! [`RequestDescriptor`](crate::types::RequestDescriptor), executes it, and
//! decodes the envelope.
//!
//! - [`tag`] - Follower tag management
//! - [`user`] - Follower profiles and remarks
//! - [`menu`] - Custom account menu
//! - [`material`] - Permanent material assets

pub mod material;
pub mod menu;
pub mod tag;
pub mod r#trait;
pub mod user;

pub use material::{MaterialApi, MaterialCounts, MaterialKind};
pub use menu::{MenuApi, MenuButton, MenuDefinition};
pub use r#trait::{ApiContext, OpenApi};
pub use tag::{TagApi, TagInfo, TagMemberData, TagMembersResponse};
pub use user::{FollowerIds, FollowerInfo, FollowerListResponse, UserApi};
