//! Outbound Gateways - `RemoteTagClient` implementations
//!
//! Connection setup and credentials happen before a client reaches
//! this layer.

pub mod in_memory;
pub mod paginated;
