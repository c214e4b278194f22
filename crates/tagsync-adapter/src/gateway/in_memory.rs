//! In-Memory Tag Client
//!
//! Simple in-process implementation of the remote tag client port.
//! Useful for testing, local development, and the demo binary.
//! Unlike most real tagging APIs it can read one key without listing,
//! so it overrides the single-key lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use tagsync_domain::{TagIdentifier, TagMap};
use tagsync_usecase::RemoteTagClient;

/// Errors returned by [`InMemoryTagClient`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InMemoryClientError {
    #[error("Resource not found: {identifier}")]
    ResourceNotFound { identifier: String },

    /// Failure registered with [`InMemoryTagClient::fail_with`]
    #[error("{message}")]
    Injected { message: String },

    #[error("Failed to acquire {0} lock")]
    Lock(&'static str),
}

/// In-memory remote tag client
///
/// Thread-safe implementation using RwLock. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagClient {
    resources: Arc<RwLock<HashMap<String, TagMap>>>,
    failures: Arc<RwLock<HashMap<String, String>>>,
    list_calls: Arc<AtomicUsize>,
    get_calls: Arc<AtomicUsize>,
}

impl InMemoryTagClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a resource with the given tags
    pub fn put_resource(
        &self,
        identifier: impl Into<String>,
        tags: TagMap,
    ) -> Result<(), InMemoryClientError> {
        let mut resources = self
            .resources
            .write()
            .map_err(|_| InMemoryClientError::Lock("write"))?;
        resources.insert(identifier.into(), tags);
        Ok(())
    }

    pub fn remove_resource(&self, identifier: &str) -> Result<(), InMemoryClientError> {
        let mut resources = self
            .resources
            .write()
            .map_err(|_| InMemoryClientError::Lock("write"))?;
        resources.remove(identifier);
        Ok(())
    }

    /// Make every call for `identifier` fail with `message`
    pub fn fail_with(
        &self,
        identifier: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), InMemoryClientError> {
        let mut failures = self
            .failures
            .write()
            .map_err(|_| InMemoryClientError::Lock("write"))?;
        failures.insert(identifier.into(), message.into());
        Ok(())
    }

    pub fn clear_failure(&self, identifier: &str) -> Result<(), InMemoryClientError> {
        let mut failures = self
            .failures
            .write()
            .map_err(|_| InMemoryClientError::Lock("write"))?;
        failures.remove(identifier);
        Ok(())
    }

    /// Number of `list_tags` calls served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_tag` calls served so far
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self, identifier: &TagIdentifier) -> Result<(), InMemoryClientError> {
        let failures = self
            .failures
            .read()
            .map_err(|_| InMemoryClientError::Lock("read"))?;
        match failures.get(identifier.as_str()) {
            Some(message) => Err(InMemoryClientError::Injected {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn with_resource<T>(
        &self,
        identifier: &TagIdentifier,
        f: impl FnOnce(&TagMap) -> T,
    ) -> Result<T, InMemoryClientError> {
        self.check_failure(identifier)?;

        let resources = self
            .resources
            .read()
            .map_err(|_| InMemoryClientError::Lock("read"))?;
        resources
            .get(identifier.as_str())
            .map(f)
            .ok_or_else(|| InMemoryClientError::ResourceNotFound {
                identifier: identifier.to_string(),
            })
    }
}

#[async_trait]
impl RemoteTagClient for InMemoryTagClient {
    type Error = InMemoryClientError;

    async fn list_tags(&self, identifier: &TagIdentifier) -> Result<TagMap, Self::Error> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.with_resource(identifier, TagMap::clone)
    }

    async fn get_tag(
        &self,
        identifier: &TagIdentifier,
        key: &str,
    ) -> Result<Option<String>, Self::Error> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        debug!(%identifier, key, "single-key lookup");
        self.with_resource(identifier, |tags| tags.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let client = InMemoryTagClient::new();
        client
            .put_resource("arn:x", tags(&[("env", "prod"), ("team", "infra")]))
            .unwrap();
        let id = TagIdentifier::new("arn:x");

        assert_eq!(client.list_tags(&id).await.unwrap().len(), 2);
        assert_eq!(client.get_tag(&id, "team").await.unwrap(), Some("infra".to_string()));
        assert_eq!(client.get_tag(&id, "missing").await.unwrap(), None);

        assert_eq!(client.list_calls(), 1);
        assert_eq!(client.get_calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let client = InMemoryTagClient::new();
        let err = client.list_tags(&TagIdentifier::new("arn:nope")).await.unwrap_err();

        assert_eq!(
            err,
            InMemoryClientError::ResourceNotFound {
                identifier: "arn:nope".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_injected_failure_and_clear() {
        let client = InMemoryTagClient::new();
        client.put_resource("arn:x", tags(&[("env", "prod")])).unwrap();
        client.fail_with("arn:x", "throttled").unwrap();
        let id = TagIdentifier::new("arn:x");

        let err = client.list_tags(&id).await.unwrap_err();
        assert_eq!(err.to_string(), "throttled");
        assert!(client.get_tag(&id, "env").await.is_err());

        client.clear_failure("arn:x").unwrap();
        assert!(client.list_tags(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let client = InMemoryTagClient::new();
        let other = client.clone();
        other.put_resource("arn:x", TagMap::new()).unwrap();

        assert!(client.list_tags(&TagIdentifier::new("arn:x")).await.is_ok());

        other.remove_resource("arn:x").unwrap();
        assert!(client.list_tags(&TagIdentifier::new("arn:x")).await.is_err());
    }
}
