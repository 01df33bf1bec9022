//! User persistence port - the storage contract.

use async_trait::async_trait;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::user::User;

use crate::dto::{Page, UserFilter};

/// Errors a storage backend may report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate key")]
    DuplicateKey,
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Port for user persistence operations, independent of the backend.
///
/// The identifier is the single primary key; the email address is a
/// unique secondary index the backend must enforce. Uniqueness and
/// single-record atomicity under concurrent calls are the backend's
/// responsibility, never the orchestration layer's.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record and return it as stored.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the identifier or the
    /// email already exists.
    async fn create(&self, user: &User) -> StoreResult<User>;

    /// Replace the record addressed by `user.id` and return the stored
    /// value. Fails with [`StoreError::NotFound`] if absent, and with
    /// [`StoreError::DuplicateKey`] if the new email collides with
    /// another record.
    async fn update(&self, user: &User) -> StoreResult<User>;

    /// Remove the record and return its prior value.
    async fn delete(&self, id: &UserId) -> StoreResult<User>;

    /// Point lookup by identifier.
    async fn query_by_id(&self, id: &UserId) -> StoreResult<User>;

    /// Point lookup by email.
    async fn query_by_email(&self, email: &EmailAddress)
    -> StoreResult<User>;

    /// Filtered, paginated listing in deterministic order.
    async fn query(
        &self,
        filter: &UserFilter,
        page: Page,
    ) -> StoreResult<Vec<User>>;
}
