//! Cryptographic adapters.

pub mod argon2;
