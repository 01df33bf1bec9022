//! RPC registration table and JSON envelopes.
//!
//! The external transport decodes bytes off the wire, verifies the
//! caller's claims and hands `(service, method, claims, payload)` to
//! [`registry::Registry::dispatch`]. The registry enforces the declared
//! role allow-list before any handler runs, stamps the request context
//! with the current time and returns the serialized response envelope.

pub mod envelope;
pub mod registry;
pub mod users;

pub use registry::{Registry, RpcEndpoint, RpcError};
pub use users::register_user_service;
