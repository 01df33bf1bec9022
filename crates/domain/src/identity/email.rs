//! Email logic management.

use std::fmt;

use crate::error::{DomainError, Result};

/// Value object of a valid email address.
///
/// Emails are the natural external lookup key of an account: two live
/// records must never share one. Addresses are normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Converts a [`String`] into a valid [`EmailAddress`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not have the shape of an
    /// RFC5322 address.
    pub fn parse(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let mut parts = email.split('@');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(host), None)
                if !local.is_empty() && host.contains('.') =>
            {
                Ok(Self(email.to_lowercase()))
            },
            _ => Err(DomainError::InvalidEmailFormat),
        }
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
