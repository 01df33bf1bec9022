//! In-memory user store.
//!
//! Backs tests and embedded deployments. Enforces the same contract as
//! the SQL backend: identifier as primary key, unique email, atomic
//! single-record operations (one write lock per call).

use std::collections::HashMap;

use application::dto::{Page, UserFilter};
use application::ports::outbound::store::{
    StoreError, StoreResult, UserStore,
};
use async_trait::async_trait;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::user::User;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.write().await;

        let duplicate = users.contains_key(user.id.as_str())
            || users.values().any(|u| u.email == user.email);
        if duplicate {
            return Err(StoreError::DuplicateKey);
        }

        users.insert(user.id.as_str().to_string(), user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(user.id.as_str()) {
            return Err(StoreError::NotFound);
        }

        let email_taken = users
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if email_taken {
            return Err(StoreError::DuplicateKey);
        }

        users.insert(user.id.as_str().to_string(), user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> StoreResult<User> {
        self.users
            .write()
            .await
            .remove(id.as_str())
            .ok_or(StoreError::NotFound)
    }

    async fn query_by_id(&self, id: &UserId) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn query_by_email(
        &self,
        email: &EmailAddress,
    ) -> StoreResult<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn query(
        &self,
        filter: &UserFilter,
        page: Page,
    ) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;

        let mut matched: Vec<User> = users
            .values()
            .filter(|u| {
                filter.enabled.is_none_or(|enabled| u.enabled == enabled)
                    && filter
                        .department
                        .as_ref()
                        .is_none_or(|dept| &u.department == dept)
                    && filter.role.is_none_or(|role| u.has_role(role))
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            a.date_created
                .cmp(&b.date_created)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });

        Ok(matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.rows as usize)
            .collect())
    }
}
