//! TagAdapter - Tag retrieval and context handoff for one service package
//!
//! The adapter normalizes remote listings into [`TagSet`]s, probes single
//! keys, and moves tags in and out of the per-operation context. It owns
//! no tag state between calls: every read goes to the remote client.
//!
//! Timeouts, cancellation and retries belong to the caller. Wrapping a
//! call in `tokio::time::timeout` or dropping its future applies directly
//! to the remote call; a cancelled publish leaves the context untouched.

use thiserror::Error;
use tracing::{debug, warn};

use tagsync_domain::{OperationContext, TagIdentifier, TagMap, TagSet};

use crate::port::remote_tag_client::RemoteTagClient;

/// Failure of a single-key lookup
#[derive(Debug, Error)]
pub enum GetTagError<E> {
    /// The remote call failed; the backend error is carried untouched
    #[error(transparent)]
    Remote(E),

    /// The resource was read, but `key` is not among its tags
    #[error("Tag '{key}' not found on resource '{identifier}'")]
    KeyNotFound {
        identifier: TagIdentifier,
        key: String,
    },
}

impl<E> GetTagError<E> {
    /// "Tag not set" rather than "fetch failed"
    pub fn is_not_found(&self) -> bool {
        matches!(self, GetTagError::KeyNotFound { .. })
    }

    pub fn remote(&self) -> Option<&E> {
        match self {
            GetTagError::Remote(e) => Some(e),
            GetTagError::KeyNotFound { .. } => None,
        }
    }

    pub fn into_remote(self) -> Option<E> {
        match self {
            GetTagError::Remote(e) => Some(e),
            GetTagError::KeyNotFound { .. } => None,
        }
    }
}

/// Raw mapping for the driver's resource-state representation
pub fn tags_to_map(tags: &TagSet) -> TagMap {
    tags.to_map()
}

/// Wrap a raw mapping as a [`TagSet`], unchanged
pub fn tags_from_map(tags: TagMap) -> TagSet {
    TagSet::from_map(tags)
}

/// Tag adapter over a remote tag client
#[derive(Debug, Clone)]
pub struct TagAdapter<C> {
    service: String,
    client: C,
}

impl<C: RemoteTagClient> TagAdapter<C> {
    /// Adapter for the `service` package, talking to `client`
    pub fn new(service: impl Into<String>, client: C) -> Self {
        Self {
            service: service.into(),
            client,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current tag set of the resource
    ///
    /// The listing is wrapped as-is: no key is filtered or rewritten.
    pub async fn fetch_tag_set(&self, identifier: &TagIdentifier) -> Result<TagSet, C::Error> {
        debug!(service = %self.service, %identifier, "listing tags");

        let tags = self.client.list_tags(identifier).await?;

        debug!(service = %self.service, %identifier, count = tags.len(), "listed tags");
        Ok(tags_from_map(tags))
    }

    /// Value of one tag
    ///
    /// Goes through [`RemoteTagClient::get_tag`], which lists then filters
    /// unless the backend provides a native single-key fetch.
    pub async fn get_single_tag(
        &self,
        identifier: &TagIdentifier,
        key: &str,
    ) -> Result<String, GetTagError<C::Error>> {
        debug!(service = %self.service, %identifier, key, "looking up tag");

        match self
            .client
            .get_tag(identifier, key)
            .await
            .map_err(GetTagError::Remote)?
        {
            Some(value) => Ok(value),
            None => Err(GetTagError::KeyNotFound {
                identifier: identifier.clone(),
                key: key.to_string(),
            }),
        }
    }

    /// Fetch the resource's tags and publish them as observed tags
    ///
    /// A context outside the tag channel is left alone; that is not an
    /// error. On failure the context is not modified.
    pub async fn publish_observed(
        &self,
        ctx: &mut OperationContext,
        identifier: &TagIdentifier,
    ) -> Result<(), C::Error> {
        let tags = self.fetch_tag_set(identifier).await?;

        match ctx.tags_mut() {
            Some(slots) => {
                if slots.set_observed(tags).is_some() {
                    warn!(service = %self.service, %identifier, "observed tags published twice in one operation");
                }
            }
            None => {
                debug!(service = %self.service, %identifier, "context has no tag channel, skipping publish");
            }
        }

        Ok(())
    }

    /// Declared tags for this operation, empty when there are none
    pub fn read_declared(&self, ctx: &OperationContext) -> TagMap {
        ctx.tags()
            .and_then(|slots| slots.declared())
            .map(tags_to_map)
            .unwrap_or_default()
    }

    /// Store tags obtained alongside other attributes in one remote read
    ///
    /// Overwrites earlier observed tags. Callers write at most once per
    /// operation.
    pub fn write_observed(&self, ctx: &mut OperationContext, tags: TagMap) {
        if let Some(slots) = ctx.tags_mut() {
            if slots.set_observed(tags_from_map(tags)).is_some() {
                warn!(service = %self.service, "observed tags overwritten in one operation");
            }
        }
    }
}
