//! # tagsync Domain Layer
//!
//! The tag vocabulary shared by every managed-resource family.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - TagIdentifier, TagSet                         ││
//! │  │  context    - TagContext, OperationContext                  ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! **This crate has ZERO external dependencies.**
//!
//! The remote tag client port and the adapter that drives it live in
//! `tagsync-usecase`; concrete clients live in `tagsync-adapter`.

pub mod context;
pub mod model;

// Re-export commonly used types
pub use context::{OperationContext, TagContext};
pub use model::{
    identifier::TagIdentifier,
    tag_set::{TagMap, TagSet},
};
