//! Adapters binding the application core to the outside world.
//!
//! Outbound: clock, Argon2id hashing, in-memory and PostgreSQL storage.
//! Inbound: the RPC registration table and JSON envelopes consumed by
//! the external dispatch mechanism.

pub mod inbound;
pub mod outbound;
