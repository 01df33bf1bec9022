//! ID logic management.

use std::fmt;

use crate::error::{DomainError, Result};

/// Value object of a valid user identifier.
///
/// Identifiers are UUIDs, generated once at account creation and
/// immutable afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Generates a fresh, globally unique identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Converts a [`String`] into a valid [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a well-formed UUID.
    pub fn parse(id: impl AsRef<str>) -> Result<Self> {
        let parsed = uuid::Uuid::parse_str(id.as_ref().trim())
            .map_err(|_| DomainError::InvalidIdFormat)?;

        Ok(Self(parsed.to_string()))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
