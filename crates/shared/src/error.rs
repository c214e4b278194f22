//! Error types for tagsync wiring

use thiserror::Error;

/// Error thrown when a configured resource is listed twice
#[derive(Debug, Error)]
#[error("Resource '{identifier}' is configured more than once")]
pub struct DuplicateResourceError {
    pub identifier: String,
}

/// General tagsync error type
#[derive(Debug, Error)]
pub enum TagSyncError {
    #[error(transparent)]
    DuplicateResource(#[from] DuplicateResourceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TagSyncError>;
