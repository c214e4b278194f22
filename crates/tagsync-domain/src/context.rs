//! Tag Context - The per-operation handoff between driver and adapter
//!
//! The lifecycle driver places the declared ("in") tags here before it
//! invokes the tag adapter; the adapter places the observed ("out") tags
//! here after a successful remote read.
//!
//! ```text
//! Driver                    OperationContext                 Adapter
//! ──────                    ────────────────                 ───────
//! config ──declared──▶  [ TagContext { in, out } ]  ◀──observed── remote
//!        ◀──────────────────────── read_declared ───────────────
//! ```
//!
//! The context is an explicit parameter, never ambient state. One
//! operation on one resource owns exactly one `OperationContext`.

use std::cell::Cell;
use std::marker::PhantomData;

use crate::model::tag_set::TagSet;

/// Declared and observed tags for one operation on one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagContext {
    /// Tags from user configuration; absent when none were configured
    declared: Option<TagSet>,
    /// Tags read back from the remote; absent until published
    observed: Option<TagSet>,
}

impl TagContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by the driver before the adapter runs
    pub fn with_declared(mut self, tags: TagSet) -> Self {
        self.declared = Some(tags);
        self
    }

    pub fn declared(&self) -> Option<&TagSet> {
        self.declared.as_ref()
    }

    pub fn observed(&self) -> Option<&TagSet> {
        self.observed.as_ref()
    }

    /// Store observed tags, returning whatever was stored before
    pub fn set_observed(&mut self, tags: TagSet) -> Option<TagSet> {
        self.observed.replace(tags)
    }

    /// Move the observed tags out, e.g. into the driver's state record
    pub fn take_observed(&mut self) -> Option<TagSet> {
        self.observed.take()
    }
}

/// Handle for one logical operation on one resource
///
/// An operation either participates in the tag channel (it carries a
/// [`TagContext`]) or it does not. Not `Clone` and not `Sync`: the handle
/// is threaded by `&mut` and cannot be shared between concurrently
/// running operations. It is still `Send`, so an operation may move to
/// another task together with its context.
#[derive(Debug, Default)]
pub struct OperationContext {
    tags: Option<TagContext>,
    _not_sync: PhantomData<Cell<()>>,
}

impl OperationContext {
    /// A context that does not participate in the tag channel
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that participates, seeded with `tags`
    pub fn with_tags(tags: TagContext) -> Self {
        Self {
            tags: Some(tags),
            _not_sync: PhantomData,
        }
    }

    /// A participating context with no declared tags
    pub fn tagged() -> Self {
        Self::with_tags(TagContext::new())
    }

    pub fn participates(&self) -> bool {
        self.tags.is_some()
    }

    pub fn tags(&self) -> Option<&TagContext> {
        self.tags.as_ref()
    }

    pub fn tags_mut(&mut self) -> Option<&mut TagContext> {
        self.tags.as_mut()
    }

    /// End the operation, handing the tag slots back to the driver
    pub fn into_tags(self) -> Option<TagContext> {
        self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_does_not_participate() {
        let ctx = OperationContext::new();
        assert!(!ctx.participates());
        assert!(ctx.tags().is_none());
        assert!(ctx.into_tags().is_none());
    }

    #[test]
    fn test_declared_is_visible_observed_starts_absent() {
        let declared: TagSet = [("env", "prod")].into_iter().collect();
        let ctx = OperationContext::with_tags(TagContext::new().with_declared(declared.clone()));

        let tags = ctx.tags().unwrap();
        assert_eq!(tags.declared(), Some(&declared));
        assert!(tags.observed().is_none());
    }

    #[test]
    fn test_set_observed_returns_previous() {
        let mut tags = TagContext::new();
        let first: TagSet = [("a", "1")].into_iter().collect();
        let second: TagSet = [("b", "2")].into_iter().collect();

        assert!(tags.set_observed(first.clone()).is_none());
        assert_eq!(tags.set_observed(second.clone()), Some(first));
        assert_eq!(tags.take_observed(), Some(second));
        assert!(tags.observed().is_none());
    }

    #[test]
    fn test_context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<OperationContext>();
    }
}
