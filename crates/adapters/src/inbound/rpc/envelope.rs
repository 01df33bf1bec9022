//! Request/response envelope convention.
//!
//! Every operation has a typed request and a response that carries
//! either a populated result or a human-readable error string, never
//! both. The outward user shape is [`UserProfile`]; the password hash
//! has no field there and can never be serialized out.

use application::dto::{NewUser, Page, UserFilter, UserUpdate};
use chrono::{DateTime, Utc};
use domain::auth::password::Password;
use domain::error::Result as DomainResult;
use domain::identity::email::EmailAddress;
use domain::identity::role::Role;
use domain::identity::user::User;
use serde::{Deserialize, Serialize};

/// Outward-facing user representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub department: String,
    pub enabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.name,
            email: user.email.as_str().to_string(),
            roles: user.roles,
            department: user.department,
            enabled: user.enabled,
            date_created: user.date_created,
            date_updated: user.date_updated,
        }
    }
}

/// Information needed to create a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUserBody {
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub department: String,
    pub password: String,
    pub password_confirm: String,
}

impl NewUserBody {
    pub fn try_into_dto(self) -> DomainResult<NewUser> {
        Ok(NewUser {
            name: self.name,
            email: EmailAddress::parse(self.email)?,
            roles: self.roles,
            department: self.department,
            password: Password::new(self.password)?,
            password_confirm: Password::new(self.password_confirm)?,
        })
    }
}

/// Partial-update field set; absent fields leave stored values alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdateBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub department: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub enabled: Option<bool>,
}

impl UserUpdateBody {
    pub fn try_into_dto(self) -> DomainResult<UserUpdate> {
        Ok(UserUpdate {
            name: self.name,
            email: self.email.map(EmailAddress::parse).transpose()?,
            roles: self.roles,
            department: self.department,
            password: self.password.map(Password::new).transpose()?,
            password_confirm: self
                .password_confirm
                .map(Password::new)
                .transpose()?,
            enabled: self.enabled,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterBody {
    pub enabled: Option<bool>,
    pub department: Option<String>,
    pub role: Option<Role>,
}

impl From<FilterBody> for UserFilter {
    fn from(body: FilterBody) -> Self {
        Self {
            enabled: body.enabled,
            department: body.department,
            role: body.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageBody {
    pub number: u32,
    pub rows: u32,
}

impl Default for PageBody {
    fn default() -> Self {
        Self { number: 1, rows: Page::DEFAULT_ROWS }
    }
}

impl From<PageBody> for Page {
    fn from(body: PageBody) -> Self {
        Page::new(body.number, body.rows)
    }
}

/// Request object for UserService.CreateUser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub new_user: NewUserBody,
}

/// Response object for UserService.CreateUser.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request object for UserService.UpdateUser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: String,
    pub update: UserUpdateBody,
}

/// Response object for UserService.UpdateUser.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request object for UserService.DeleteUser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    pub id: String,
}

/// Response object for UserService.DeleteUser.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteUserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request object for UserService.QueryUser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryUserRequest {
    pub filter: FilterBody,
    pub page: PageBody,
}

/// Response object for UserService.QueryUser.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryUserResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request object for UserService.QueryUserByID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryUserByIdRequest {
    pub id: String,
}

/// Response object for UserService.QueryUserByID.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryUserByIdResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request object for UserService.QueryUserByEmail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryUserByEmailRequest {
    pub email: String,
}

/// Response object for UserService.QueryUserByEmail.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryUserByEmailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request object for UserService.Authenticate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

/// Claims material returned on successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedIdentity {
    pub id: String,
    pub roles: Vec<Role>,
}

/// Response object for UserService.Authenticate.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<AuthenticatedIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_field() {
        let response = QueryUserByIdResponse {
            user: None,
            error: Some("user not found".into()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"error":"user not found"}"#);

        let empty = serde_json::to_string(&QueryUserByIdResponse::default())
            .unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn wire_fields_are_camel_case() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{
                "newUser": {
                    "name": "John Doe",
                    "email": "user@example.com",
                    "roles": ["ADMIN"],
                    "password": "gophers",
                    "passwordConfirm": "gophers"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(request.new_user.name, "John Doe");
        assert_eq!(request.new_user.roles, vec![Role::Admin]);
        assert_eq!(request.new_user.password_confirm, "gophers");
        assert!(request.new_user.department.is_empty());
    }

    #[test]
    fn profile_carries_no_password_material() {
        // Field-level guarantee: the type simply has no hash to leak.
        let json = serde_json::to_value(UserProfile {
            id: "x".into(),
            name: "n".into(),
            email: "user@example.com".into(),
            roles: vec![Role::User],
            department: String::new(),
            enabled: true,
            date_created: Default::default(),
            date_updated: Default::default(),
        })
        .unwrap();

        let keys: Vec<&String> =
            json.as_object().unwrap().keys().collect();
        assert!(!keys.iter().any(|k| k.contains("password")));
    }
}
