//! User domain entity.

use chrono::{DateTime, Utc};

use crate::auth::password::PasswordHash;
use crate::identity::email::EmailAddress;
use crate::identity::id::UserId;
use crate::identity::role::Role;

/// Represents a registered user within the system domain.
///
/// `id` is assigned once at creation and never changes. Both timestamps
/// are stamped from the per-request injected time, never from a wall
/// clock read inside business logic, and `date_updated` never precedes
/// `date_created`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub roles: Vec<Role>,
    pub password_hash: PasswordHash,
    pub department: String,
    pub enabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl User {
    /// Whether the user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
