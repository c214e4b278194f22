//! Remote Tag Client - Abstract access to a service's tagging API
//!
//! The client is authenticated and constructed by the connection layer.
//! Call options it was built with travel with it; the adapter never
//! inspects them.

use std::sync::Arc;

use async_trait::async_trait;
use tagsync_domain::{TagIdentifier, TagMap};

/// Remote Tag Client Trait
///
/// This is a PORT in hexagonal architecture.
///
/// `list_tags` must return the complete tag set of the resource. Backends
/// whose API pages its results have to drain every page before returning
/// (see `PaginatedTagClient` in `tagsync-adapter`).
///
/// Errors are the backend's own type. The adapter hands them back to the
/// caller untouched so retry/fatal classification still works upstream.
#[async_trait]
pub trait RemoteTagClient: Send + Sync {
    /// Backend failure (network, auth, throttling, missing resource, ...)
    type Error: std::error::Error + Send + Sync + 'static;

    /// List every tag on the resource
    async fn list_tags(&self, identifier: &TagIdentifier) -> Result<TagMap, Self::Error>;

    /// Fetch a single tag value, `None` when the key is not set
    ///
    /// The default lists all tags and filters locally. Backends with a
    /// real single-key remote call should override this.
    async fn get_tag(
        &self,
        identifier: &TagIdentifier,
        key: &str,
    ) -> Result<Option<String>, Self::Error> {
        let mut tags = self.list_tags(identifier).await?;
        Ok(tags.remove(key))
    }
}

#[async_trait]
impl<C: RemoteTagClient> RemoteTagClient for Arc<C> {
    type Error = C::Error;

    async fn list_tags(&self, identifier: &TagIdentifier) -> Result<TagMap, Self::Error> {
        self.as_ref().list_tags(identifier).await
    }

    async fn get_tag(
        &self,
        identifier: &TagIdentifier,
        key: &str,
    ) -> Result<Option<String>, Self::Error> {
        self.as_ref().get_tag(identifier, key).await
    }
}
