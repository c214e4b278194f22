//! # tagsync Shared
//!
//! Configuration and error types used by the tagsync binaries.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
