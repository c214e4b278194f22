//! # tagsync Adapter Layer
//!
//! Outbound adapters implementing the `RemoteTagClient` port.
//!
//! ## Structure
//!
//! - `gateway/in_memory` - Thread-safe in-process tag store
//! - `gateway/paginated` - Drains continuation-token listings into one set

pub mod gateway;

pub use gateway::in_memory::{InMemoryClientError, InMemoryTagClient};
pub use gateway::paginated::{
    ListTagsPage, ListTagsRequest, PaginatedTagClient, PaginationError, TagPageSource,
};
