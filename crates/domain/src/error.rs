//! Custom error handler for domain (core).

pub type Result<T> = std::result::Result<T, DomainError>;

/// Enum representing custom domain errors.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid email formatting")]
    InvalidEmailFormat,
    #[error("identifier must be a UUID")]
    InvalidIdFormat,
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
    #[error("password and confirmation do not match")]
    PasswordMismatch,
    #[error("password hash is not in PHC format")]
    InvalidPasswordHash,

    #[error("a user must hold at least one role")]
    EmptyRoles,
}
