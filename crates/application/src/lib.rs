//! Orchestration layer of the identity-record service.
//!
//! Use cases validate authorization against the caller's claims, derive
//! generated fields (identifier, password hash, timestamps) and delegate
//! persistence to the outbound storage port. All durable state lives
//! behind that port; the layer itself is stateless and freely shareable
//! across concurrent calls.

pub mod context;
pub mod dto;
pub mod error;
pub mod ports;
pub mod usecases;
