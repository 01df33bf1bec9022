//! Core entities and value objects of the identity-record service.
//!
//! This crate has no I/O and no dependency on any other layer.

pub mod auth;
pub mod error;
pub mod identity;
