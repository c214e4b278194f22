//! # tagsync Use Case Layer
//!
//! Application-specific tag rules for one managed-resource family.
//! This layer orchestrates the flow of tags between the remote tag client
//! (a port, implemented in `tagsync-adapter`) and the per-operation
//! [`OperationContext`](tagsync_domain::OperationContext).
//!
//! - `port/` - What this layer needs from the outside world
//! - `tag_adapter` - Fetch, single-key probe, and context handoff
//! - `service_package` - Object-safe entry point for the generic tag engine

pub mod port;
pub mod service_package;
pub mod tag_adapter;

pub use tagsync_domain;

pub use port::remote_tag_client::RemoteTagClient;
pub use service_package::ServicePackageTags;
pub use tag_adapter::{tags_from_map, tags_to_map, GetTagError, TagAdapter};
