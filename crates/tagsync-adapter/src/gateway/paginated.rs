//! Paginated Tag Client - Complete listings over token-paged APIs
//!
//! Some tagging APIs return tags a page at a time with a continuation
//! token. The tag adapter expects `list_tags` to be complete, so this
//! client keeps requesting pages until the token runs out.
//!
//! ```text
//! list_tags(arn)
//!   ├── page(arn, None)      → {a, b}, token "t1"
//!   ├── page(arn, "t1")      → {c},    token "t2"
//!   └── page(arn, "t2")      → {d},    no token   ⇒ {a, b, c, d}
//! ```

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use tagsync_domain::{TagIdentifier, TagMap};
use tagsync_usecase::RemoteTagClient;

/// One `ListTagsForResource` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTagsRequest {
    pub resource_arn: String,
    pub next_token: Option<String>,
}

/// One page of tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTagsPage {
    pub tags: TagMap,
    /// `None` (or empty) on the last page
    pub next_token: Option<String>,
}

/// A tagging API that answers one page per call
#[async_trait]
pub trait TagPageSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_tags_page(&self, request: ListTagsRequest) -> Result<ListTagsPage, Self::Error>;
}

/// Errors returned by [`PaginatedTagClient`]
#[derive(Debug, Error)]
pub enum PaginationError<E> {
    /// A page request failed; the source error is carried untouched
    #[error(transparent)]
    Source(E),

    /// The source handed back a token it already issued
    #[error("Pagination token '{token}' repeated while listing tags for '{identifier}'")]
    RepeatedToken { identifier: String, token: String },
}

/// Remote tag client that drains every page of a [`TagPageSource`]
#[derive(Debug, Clone)]
pub struct PaginatedTagClient<S> {
    source: S,
}

impl<S: TagPageSource> PaginatedTagClient<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: TagPageSource> RemoteTagClient for PaginatedTagClient<S> {
    type Error = PaginationError<S::Error>;

    async fn list_tags(&self, identifier: &TagIdentifier) -> Result<TagMap, Self::Error> {
        let mut tags = TagMap::new();
        let mut seen = HashSet::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .source
                .list_tags_page(ListTagsRequest {
                    resource_arn: identifier.to_string(),
                    next_token: next_token.clone(),
                })
                .await
                .map_err(PaginationError::Source)?;
            pages += 1;
            tags.extend(page.tags);

            match page.next_token.filter(|token| !token.is_empty()) {
                Some(token) => {
                    if !seen.insert(token.clone()) {
                        return Err(PaginationError::RepeatedToken {
                            identifier: identifier.to_string(),
                            token,
                        });
                    }
                    next_token = Some(token);
                }
                None => break,
            }
        }

        debug!(%identifier, pages, count = tags.len(), "drained paginated tag listing");
        Ok(tags)
    }
}
