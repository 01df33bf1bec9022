//! Inbound port covering every user-record operation.

use async_trait::async_trait;
use domain::auth::password::Password;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::user::User;

use crate::context::GenericRequest;
use crate::dto::{AuthenticatedUser, NewUser, Page, UserFilter, UserUpdate};
use crate::error::Result;

/// The user-record service surface exposed to inbound adapters.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a user: hash the password, assign a fresh identifier,
    /// enable the account and stamp both timestamps with the injected
    /// time.
    async fn create_user(
        &self,
        new_user: NewUser,
        request: GenericRequest,
    ) -> Result<User>;

    /// Apply a partial update to the addressed record. Permitted only
    /// to administrators or to the record's own subject.
    async fn update_user(
        &self,
        id: UserId,
        update: UserUpdate,
        request: GenericRequest,
    ) -> Result<User>;

    /// Remove the addressed record and return its prior value.
    async fn delete_user(
        &self,
        id: UserId,
        request: GenericRequest,
    ) -> Result<User>;

    /// Filtered, paginated listing of users.
    async fn query_user(
        &self,
        filter: UserFilter,
        page: Page,
        request: GenericRequest,
    ) -> Result<Vec<User>>;

    /// Point lookup by identifier.
    async fn query_user_by_id(
        &self,
        id: UserId,
        request: GenericRequest,
    ) -> Result<User>;

    /// Point lookup by email.
    async fn query_user_by_email(
        &self,
        email: EmailAddress,
        request: GenericRequest,
    ) -> Result<User>;

    /// Verify credentials against the stored hash. Success yields the
    /// identity material an external token layer turns into claims.
    async fn authenticate(
        &self,
        email: EmailAddress,
        password: Password,
        request: GenericRequest,
    ) -> Result<AuthenticatedUser>;
}
