//! Verified caller claims.

use crate::identity::id::UserId;
use crate::identity::role::Role;

/// The caller's verified identity and role set, supplied by an external
/// authentication layer. The core never verifies credentials itself; it
/// only consumes an already-verified claim set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    /// Identifier of the caller's own account, when authenticated.
    pub subject: Option<UserId>,
    /// Roles granted to the caller.
    pub roles: Vec<Role>,
}

impl Claims {
    /// Claims carrying only a role set, no subject.
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self { subject: None, roles }
    }

    /// Whether the caller holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the caller holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Role-and-ownership rule: an administrator may act on any record,
    /// any other caller only on their own.
    pub fn authorizes(&self, target: &UserId) -> bool {
        self.is_admin() || self.subject.as_ref() == Some(target)
    }
}
