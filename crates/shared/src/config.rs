//! Configuration types for tagsync

use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::error::{DuplicateResourceError, TagSyncError};

/// Service package used when the configuration names none
pub const DEFAULT_SERVICE_NAME: &str = "timestreaminfluxdb";

fn default_service() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

/// One managed resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// ARN or service-specific identifier
    pub identifier: String,

    /// Tags from user configuration
    #[serde(default)]
    pub declared_tags: HashMap<String, String>,

    /// Tags currently on the remote resource; omitted when the
    /// resource does not exist remotely
    #[serde(default)]
    pub remote_tags: Option<HashMap<String, String>>,

    /// Make every remote call for this resource fail with this message
    #[serde(default)]
    pub fail_with: Option<String>,
}

/// tagsync configuration file (tagsync.json)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSyncConfig {
    /// Service package the resources belong to
    #[serde(default = "default_service")]
    pub service: String,

    /// Managed resources
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl TagSyncConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.service.trim().is_empty() {
            return Err(TagSyncError::Config("service must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            if resource.identifier.trim().is_empty() {
                return Err(TagSyncError::Config(
                    "resource identifier must not be empty".to_string(),
                ));
            }
            if !seen.insert(resource.identifier.as_str()) {
                return Err(DuplicateResourceError {
                    identifier: resource.identifier.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Get resource identifiers
    pub fn identifiers(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.identifier.as_str()).collect()
    }
}
