//! Data Transfer Objects for the application layer.
//!
//! DTOs are used to transfer data between layers without exposing domain
//! entities.

use domain::auth::password::Password;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::role::Role;

/// Information needed to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: EmailAddress,
    pub roles: Vec<Role>,
    pub department: String,
    pub password: Password,
    pub password_confirm: Password,
}

/// Partial update applied over an existing user.
///
/// Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub roles: Option<Vec<Role>>,
    pub department: Option<String>,
    pub password: Option<Password>,
    pub password_confirm: Option<Password>,
    pub enabled: Option<bool>,
}

/// Listing predicates, AND-combined. An empty filter matches everyone.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub enabled: Option<bool>,
    pub department: Option<String>,
    pub role: Option<Role>,
}

/// One page of a listing.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Rows per page, capped at [`Page::MAX_ROWS`].
    pub rows: u32,
}

impl Page {
    pub const DEFAULT_ROWS: u32 = 50;
    pub const MAX_ROWS: u32 = 100;

    pub fn new(number: u32, rows: u32) -> Self {
        Self {
            number: number.max(1),
            rows: rows.clamp(1, Self::MAX_ROWS),
        }
    }

    /// Number of rows to skip before this page.
    ///
    /// Tolerates a directly constructed `number: 0` by treating it as
    /// the first page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.rows)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_ROWS)
    }
}

/// Identity material produced by a successful authentication, from
/// which the external token layer mints claims.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub roles: Vec<Role>,
}
