//! Application-level errors.

use domain::error::DomainError;

use crate::ports::outbound::store::StoreError;

pub type Result<T> = std::result::Result<T, ApplicationError>;

/// Errors that can occur in the application layer.
///
/// Every variant maps to the human-readable string carried by the
/// response envelope; none of them is recovered from internally.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Unauthorized action")]
    Unauthorized,
    #[error("user not found")]
    NotFound,
    #[error("user already exists")]
    DuplicateKey,
    #[error("password hashing failed")]
    Hashing,
    #[error("authentication failed")]
    InvalidCredentials,

    #[error("storage failure: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::DuplicateKey => Self::DuplicateKey,
            StoreError::Backend(source) => Self::Storage(source),
        }
    }
}
