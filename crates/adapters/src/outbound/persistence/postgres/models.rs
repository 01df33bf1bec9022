//! Row models mapping between SQL records and domain entities.

use chrono::{DateTime, Utc};
use domain::auth::password::PasswordHash;
use domain::error::DomainError;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::role::Role;
use domain::identity::user::User;

/// One row of the `users` table.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub password: String,
    pub department: String,
    pub enabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl UserRecord {
    pub fn try_into_user(self) -> Result<User, DomainError> {
        let roles = self
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(User {
            id: UserId::parse(&self.id)?,
            name: self.name,
            email: EmailAddress::parse(self.email)?,
            roles,
            password_hash: PasswordHash::parse(self.password)?,
            department: self.department,
            enabled: self.enabled,
            date_created: self.date_created,
            date_updated: self.date_updated,
        })
    }
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            roles: user.roles.iter().map(|r| r.as_str().to_string()).collect(),
            password: user.password_hash.as_str().to_string(),
            department: user.department.clone(),
            enabled: user.enabled,
            date_created: user.date_created,
            date_updated: user.date_updated,
        }
    }
}
