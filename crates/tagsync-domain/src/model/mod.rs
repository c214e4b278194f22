//! Domain Models - The vocabulary of tag reconciliation
//!
//! These names match how the provisioning tool talks about tags:
//! a resource is named by an identifier, and carries a set of tags.

pub mod identifier;
pub mod tag_set;
