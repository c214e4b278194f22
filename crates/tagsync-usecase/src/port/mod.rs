//! Port Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define what the tag adapter needs from a remote service,
//! but NOT how it's actually reached. That's the adapter crate's job.
//!
//! ```text
//! Use Case Layer        │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait RemoteTagClient │  InMemoryTagClient
//!   fn list_tags()      │  PaginatedTagClient<S>
//!   fn get_tag()        │
//! ```

pub mod remote_tag_client;
