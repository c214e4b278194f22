//! Service package entry point for the generic tag engine
//!
//! The engine drives many resource families and does not know their
//! client types. It holds each family as a `dyn ServicePackageTags` and
//! asks it to list a resource's tags into the operation context.

use async_trait::async_trait;

use tagsync_domain::{OperationContext, TagIdentifier};

use crate::port::remote_tag_client::RemoteTagClient;
use crate::tag_adapter::TagAdapter;

/// Object-safe tag listing for one service package
#[async_trait]
pub trait ServicePackageTags: Send + Sync {
    fn service_name(&self) -> &str;

    /// List the resource's tags and publish them into `ctx`
    ///
    /// The backend error is boxed as-is; callers recover it with
    /// `anyhow::Error::downcast_ref`.
    async fn list_tags(
        &self,
        ctx: &mut OperationContext,
        identifier: &TagIdentifier,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl<C: RemoteTagClient> ServicePackageTags for TagAdapter<C> {
    fn service_name(&self) -> &str {
        TagAdapter::service_name(self)
    }

    async fn list_tags(
        &self,
        ctx: &mut OperationContext,
        identifier: &TagIdentifier,
    ) -> anyhow::Result<()> {
        self.publish_observed(ctx, identifier)
            .await
            .map_err(anyhow::Error::new)
    }
}
