//! Read pass - What a lifecycle driver does with the tag adapter on refresh
//!
//! For each resource: seed the operation context with declared tags,
//! publish the observed tags, then move both into a report standing in
//! for the driver's state record.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, warn};

use shared::{ResourceConfig, TagSyncConfig};
use tagsync_adapter::{InMemoryClientError, InMemoryTagClient};
use tagsync_domain::{OperationContext, TagContext, TagIdentifier, TagMap};
use tagsync_usecase::{tags_from_map, tags_to_map, RemoteTagClient, TagAdapter};

/// Result of one resource's read pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReport {
    pub identifier: String,
    pub declared: TagMap,
    pub observed: TagMap,
    /// Probed key and its value, `None` when the tag is not set
    pub probe: Option<(String, Option<String>)>,
}

impl ReadReport {
    pub fn matches_declared(&self) -> bool {
        self.declared == self.observed
    }
}

/// Why one resource's read pass produced no report
#[derive(Debug, Error)]
pub enum ReadError<E> {
    /// The remote client failed; its error is carried untouched
    #[error(transparent)]
    Remote(E),

    /// The task reading this resource panicked or was cancelled
    #[error("read task did not finish: {0}")]
    Task(JoinError),
}

/// Build the in-memory backend described by the configuration
pub fn seed_client(config: &TagSyncConfig) -> Result<InMemoryTagClient, InMemoryClientError> {
    let client = InMemoryTagClient::new();

    for resource in &config.resources {
        if let Some(tags) = &resource.remote_tags {
            client.put_resource(resource.identifier.clone(), tags.clone())?;
        }
        if let Some(message) = &resource.fail_with {
            client.fail_with(resource.identifier.clone(), message.clone())?;
        }
    }

    Ok(client)
}

/// Refresh one resource
pub async fn read_resource<C: RemoteTagClient>(
    adapter: &TagAdapter<C>,
    resource: &ResourceConfig,
    probe_key: Option<&str>,
) -> Result<ReadReport, C::Error> {
    let identifier = TagIdentifier::new(resource.identifier.clone());

    let mut slots = TagContext::new();
    if !resource.declared_tags.is_empty() {
        slots = slots.with_declared(tags_from_map(resource.declared_tags.clone()));
    }
    let mut ctx = OperationContext::with_tags(slots);

    let declared = adapter.read_declared(&ctx);
    adapter.publish_observed(&mut ctx, &identifier).await?;

    let probe = match probe_key {
        Some(key) => match adapter.get_single_tag(&identifier, key).await {
            Ok(value) => Some((key.to_string(), Some(value))),
            Err(e) => match e.into_remote() {
                Some(remote) => return Err(remote),
                None => Some((key.to_string(), None)),
            },
        },
        None => None,
    };

    let observed = ctx
        .into_tags()
        .and_then(|mut slots| slots.take_observed())
        .map(|tags| tags_to_map(&tags))
        .unwrap_or_default();

    Ok(ReadReport {
        identifier: identifier.to_string(),
        declared,
        observed,
        probe,
    })
}

/// Refresh every configured resource concurrently, one context each
///
/// Every configured resource gets exactly one entry, including those whose
/// task never finished.
pub async fn read_all<C>(
    adapter: Arc<TagAdapter<C>>,
    resources: Vec<ResourceConfig>,
    probe_key: Option<String>,
) -> Vec<(String, Result<ReadReport, ReadError<C::Error>>)>
where
    C: RemoteTagClient + 'static,
{
    let handles: Vec<_> = resources
        .into_iter()
        .map(|resource| {
            let adapter = Arc::clone(&adapter);
            let probe_key = probe_key.clone();
            let identifier = resource.identifier.clone();
            let handle = tokio::spawn(async move {
                read_resource(&adapter, &resource, probe_key.as_deref()).await
            });
            (identifier, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (identifier, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome.map_err(ReadError::Remote),
            Err(e) => {
                warn!("read pass task for {} did not finish: {}", identifier, e);
                Err(ReadError::Task(e))
            }
        };
        results.push((identifier, outcome));
    }
    results
}

/// Log one report the way an operator would want to read it
pub fn log_report(report: &ReadReport) {
    info!("   ✓ {}", report.identifier);
    info!(
        "     declared: {} tag(s), observed: {} tag(s), matches: {}",
        report.declared.len(),
        report.observed.len(),
        report.matches_declared()
    );
    if let Some((key, value)) = &report.probe {
        match value {
            Some(value) => info!("     {} = {}", key, value),
            None => info!("     {} is not set", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::DEFAULT_SERVICE_NAME;

    fn config() -> TagSyncConfig {
        TagSyncConfig::from_json(
            r#"{
                "resources": [
                    {
                        "identifier": "arn:a",
                        "declaredTags": { "env": "prod" },
                        "remoteTags": { "env": "prod" }
                    },
                    {
                        "identifier": "arn:b",
                        "remoteTags": { "env": "dev", "team": "infra" }
                    },
                    { "identifier": "arn:c", "remoteTags": {}, "failWith": "throttled" },
                    { "identifier": "arn:d" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_read_resource_in_sync() {
        let config = config();
        let adapter = TagAdapter::new(DEFAULT_SERVICE_NAME, seed_client(&config).unwrap());

        let report = read_resource(&adapter, &config.resources[0], Some("env"))
            .await
            .unwrap();
        assert!(report.matches_declared());
        assert_eq!(report.probe, Some(("env".to_string(), Some("prod".to_string()))));
    }

    #[tokio::test]
    async fn test_read_resource_probe_missing_key() {
        let config = config();
        let adapter = TagAdapter::new(DEFAULT_SERVICE_NAME, seed_client(&config).unwrap());

        let report = read_resource(&adapter, &config.resources[1], Some("owner"))
            .await
            .unwrap();
        assert!(report.declared.is_empty());
        assert_eq!(report.observed.len(), 2);
        assert!(!report.matches_declared());
        assert_eq!(report.probe, Some(("owner".to_string(), None)));
    }

    #[tokio::test]
    async fn test_read_all_reports_failures_per_resource() {
        let config = config();
        let adapter = Arc::new(TagAdapter::new(DEFAULT_SERVICE_NAME, seed_client(&config).unwrap()));

        let results = read_all(adapter, config.resources.clone(), None).await;
        assert_eq!(results.len(), 4);

        let failed: Vec<_> = results
            .iter()
            .filter_map(|(id, outcome)| outcome.as_ref().err().map(|e| (id.as_str(), e)))
            .collect();
        assert_eq!(failed.len(), 2);
        assert!(failed.iter().any(|(id, e)| *id == "arn:c" && e.to_string() == "throttled"));
        assert!(failed
            .iter()
            .any(|(id, e)| *id == "arn:d"
                && matches!(e, ReadError::Remote(InMemoryClientError::ResourceNotFound { .. }))));
    }

    /// Panics while reading one identifier, delegates the rest
    struct PanicsOn {
        identifier: &'static str,
        inner: InMemoryTagClient,
    }

    #[async_trait]
    impl RemoteTagClient for PanicsOn {
        type Error = InMemoryClientError;

        async fn list_tags(&self, identifier: &TagIdentifier) -> Result<TagMap, Self::Error> {
            if identifier.as_str() == self.identifier {
                panic!("backend crashed on {}", identifier);
            }
            self.inner.list_tags(identifier).await
        }
    }

    #[tokio::test]
    async fn test_read_all_keeps_resources_whose_task_panicked() {
        let config = TagSyncConfig::from_json(
            r#"{
                "resources": [
                    { "identifier": "arn:ok", "remoteTags": { "env": "prod" } },
                    { "identifier": "arn:boom", "remoteTags": {} }
                ]
            }"#,
        )
        .unwrap();
        let client = PanicsOn {
            identifier: "arn:boom",
            inner: seed_client(&config).unwrap(),
        };
        let adapter = Arc::new(TagAdapter::new(DEFAULT_SERVICE_NAME, client));

        let results = read_all(adapter, config.resources.clone(), None).await;
        assert_eq!(results.len(), 2);

        let (_, ok) = results.iter().find(|(id, _)| id == "arn:ok").unwrap();
        assert!(ok.is_ok());

        let (_, boom) = results.iter().find(|(id, _)| id == "arn:boom").unwrap();
        match boom {
            Err(ReadError::Task(e)) => assert!(e.is_panic()),
            other => panic!("expected a task failure, got {:?}", other),
        }
    }
}
