//! Argon2id password hasher implementation.

use application::error::{ApplicationError, Result};
use application::ports::outbound::PasswordHasher;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier, SaltString,
};
use argon2::{Argon2, Params, Version};
use domain::auth::password::{Password, PasswordHash as DomainPasswordHash};
use rand::rngs::OsRng;
use serde::Deserialize;

const OUTPUT_LENGTH: usize = 32;

/// Cost parameters for the Argon2id primitive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        // OWASP-recommended Argon2id baseline.
        Self { memory_cost: 19456, iterations: 2, parallelism: 1 }
    }
}

/// Argon2id password hasher adapter.
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Create a new Argon2 hasher with the given cost parameters.
    pub fn new(config: &HasherConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(OUTPUT_LENGTH),
        )
        .map_err(|_| ApplicationError::Hashing)?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<DomainPasswordHash> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| ApplicationError::Hashing)?;

        Ok(DomainPasswordHash::parse(hash.to_string())?)
    }

    fn verify(
        &self,
        password: &Password,
        hash: &DomainPasswordHash,
    ) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash.as_str())
            .map_err(|_| ApplicationError::Hashing)?;

        match self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(ApplicationError::Hashing),
        }
    }
}
