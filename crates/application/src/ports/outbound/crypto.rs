//! Interfaces for cryptographic operations.

use domain::auth::password::{Password, PasswordHash};

use crate::error::Result;

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password using a one-way, cost-parameterized algorithm.
    fn hash(&self, password: &Password) -> Result<PasswordHash>;

    /// Verify a password against a stored hash. `Ok(false)` means the
    /// password does not match; `Err` means the primitive itself failed.
    fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool>;
}
