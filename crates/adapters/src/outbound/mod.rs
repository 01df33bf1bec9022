//! Outbound adapters.

pub mod clock;
pub mod crypto;
pub mod persistence;
