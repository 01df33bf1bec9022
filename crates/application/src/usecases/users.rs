//! User-record use case implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::auth::password::{Password, PasswordHash};
use domain::error::DomainError;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::role::Role;
use domain::identity::user::User;

use crate::context::GenericRequest;
use crate::dto::{AuthenticatedUser, NewUser, Page, UserFilter, UserUpdate};
use crate::error::{ApplicationError, Result};
use crate::ports::inbound::IdentityService;
use crate::ports::outbound::{PasswordHasher, StoreError, UserStore};

/// Hash verified when an email lookup misses, so the unknown-email and
/// wrong-password paths cost the same and neither is observable.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// User-record orchestration service.
///
/// Stateless besides its read-only ports; a single instance is shared
/// across concurrent calls. Persistence failures are surfaced, never
/// retried or masked.
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self { store, hasher }
    }

    fn check_password_pair(
        password: &Password,
        confirm: Option<&Password>,
    ) -> Result<()> {
        match confirm {
            Some(confirm) if confirm.as_str() == password.as_str() => Ok(()),
            _ => Err(DomainError::PasswordMismatch.into()),
        }
    }
}

#[async_trait]
impl IdentityService for UserService {
    async fn create_user(
        &self,
        new_user: NewUser,
        request: GenericRequest,
    ) -> Result<User> {
        Self::check_password_pair(
            &new_user.password,
            Some(&new_user.password_confirm),
        )?;

        let password_hash = self.hasher.hash(&new_user.password)?;

        let roles = if new_user.roles.is_empty() {
            vec![Role::User]
        } else {
            new_user.roles
        };

        let user = User {
            id: UserId::generate(),
            name: new_user.name,
            email: new_user.email,
            roles,
            password_hash,
            department: new_user.department,
            enabled: true,
            date_created: request.now,
            date_updated: request.now,
        };

        let stored = self.store.create(&user).await?;
        tracing::debug!(id = %stored.id, "user created");
        Ok(stored)
    }

    async fn update_user(
        &self,
        id: UserId,
        update: UserUpdate,
        request: GenericRequest,
    ) -> Result<User> {
        // Ownership rule checked before any storage access.
        if !request.claims.authorizes(&id) {
            tracing::warn!(target = %id, "unauthorized update attempt");
            return Err(ApplicationError::Unauthorized);
        }

        let mut user = self.store.query_by_id(&id).await?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(roles) = update.roles {
            if roles.is_empty() {
                return Err(DomainError::EmptyRoles.into());
            }
            user.roles = roles;
        }
        if let Some(department) = update.department {
            user.department = department;
        }
        if let Some(enabled) = update.enabled {
            user.enabled = enabled;
        }
        if let Some(password) = update.password {
            Self::check_password_pair(
                &password,
                update.password_confirm.as_ref(),
            )?;
            user.password_hash = self.hasher.hash(&password)?;
        }

        user.date_updated = request.now;

        let stored = self.store.update(&user).await?;
        tracing::debug!(id = %stored.id, "user updated");
        Ok(stored)
    }

    async fn delete_user(
        &self,
        id: UserId,
        _request: GenericRequest,
    ) -> Result<User> {
        let removed = self.store.delete(&id).await?;
        tracing::debug!(id = %removed.id, "user deleted");
        Ok(removed)
    }

    async fn query_user(
        &self,
        filter: UserFilter,
        page: Page,
        _request: GenericRequest,
    ) -> Result<Vec<User>> {
        Ok(self.store.query(&filter, page).await?)
    }

    async fn query_user_by_id(
        &self,
        id: UserId,
        _request: GenericRequest,
    ) -> Result<User> {
        Ok(self.store.query_by_id(&id).await?)
    }

    async fn query_user_by_email(
        &self,
        email: EmailAddress,
        _request: GenericRequest,
    ) -> Result<User> {
        Ok(self.store.query_by_email(&email).await?)
    }

    async fn authenticate(
        &self,
        email: EmailAddress,
        password: Password,
        _request: GenericRequest,
    ) -> Result<AuthenticatedUser> {
        let user = match self.store.query_by_email(&email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                // Burn a verification anyway to keep timing level.
                if let Ok(decoy) = PasswordHash::parse(DECOY_HASH) {
                    let _ = self.hasher.verify(&password, &decoy);
                }
                return Err(ApplicationError::InvalidCredentials);
            },
            Err(err) => return Err(err.into()),
        };

        let verified = self
            .hasher
            .verify(&password, &user.password_hash)
            .unwrap_or(false);

        if !verified || !user.enabled {
            tracing::warn!(email = %email, "authentication failed");
            return Err(ApplicationError::InvalidCredentials);
        }

        Ok(AuthenticatedUser { id: user.id, roles: user.roles })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};
    use domain::auth::claims::Claims;

    use super::*;
    use crate::ports::outbound::store::StoreResult;

    /// In-memory store that also counts every call, so tests can assert
    /// that unauthorized operations never touch storage.
    #[derive(Default)]
    struct RecordingStore {
        users: Mutex<HashMap<String, User>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserStore for RecordingStore {
        async fn create(&self, user: &User) -> StoreResult<User> {
            self.calls.lock().unwrap().push("create");
            let mut users = self.users.lock().unwrap();
            let duplicate = users.contains_key(user.id.as_str())
                || users.values().any(|u| u.email == user.email);
            if duplicate {
                return Err(StoreError::DuplicateKey);
            }
            users.insert(user.id.as_str().to_string(), user.clone());
            Ok(user.clone())
        }

        async fn update(&self, user: &User) -> StoreResult<User> {
            self.calls.lock().unwrap().push("update");
            let mut users = self.users.lock().unwrap();
            if !users.contains_key(user.id.as_str()) {
                return Err(StoreError::NotFound);
            }
            users.insert(user.id.as_str().to_string(), user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: &UserId) -> StoreResult<User> {
            self.calls.lock().unwrap().push("delete");
            self.users
                .lock()
                .unwrap()
                .remove(id.as_str())
                .ok_or(StoreError::NotFound)
        }

        async fn query_by_id(&self, id: &UserId) -> StoreResult<User> {
            self.calls.lock().unwrap().push("query_by_id");
            self.users
                .lock()
                .unwrap()
                .get(id.as_str())
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn query_by_email(
            &self,
            email: &EmailAddress,
        ) -> StoreResult<User> {
            self.calls.lock().unwrap().push("query_by_email");
            self.users
                .lock()
                .unwrap()
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
            self.calls.lock().unwrap().push("query");
            let users = self.users.lock().unwrap();
            let mut matched: Vec<User> = users
                .values()
                .filter(|u| {
                    filter.enabled.is_none_or(|e| u.enabled == e)
                        && filter
                            .department
                            .as_ref()
                            .is_none_or(|d| &u.department == d)
                        && filter.role.is_none_or(|r| u.has_role(r))
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

    /// Transparent hasher: fast and trivially verifiable in assertions.
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &Password) -> Result<PasswordHash> {
            Ok(PasswordHash::parse(format!(
                "$plain$v=1$t=0$salt${}",
                password.as_str()
            ))?)
        }

        fn verify(
            &self,
            password: &Password,
            hash: &PasswordHash,
        ) -> Result<bool> {
            Ok(hash.as_str().rsplit('$').next() == Some(password.as_str()))
        }
    }

    fn service() -> (Arc<RecordingStore>, UserService) {
        let store = Arc::new(RecordingStore::default());
        let svc = UserService::new(store.clone(), Arc::new(PlainHasher));
        (store, svc)
    }

    fn request(claims: Claims) -> GenericRequest {
        let now = Utc.with_ymd_and_hms(2018, 10, 1, 0, 0, 0).unwrap();
        GenericRequest::new(claims, now)
    }

    fn admin() -> Claims {
        Claims::with_roles(vec![Role::Admin])
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "John Doe".into(),
            email: EmailAddress::parse(email).unwrap(),
            roles: vec![Role::Admin],
            department: "platform".into(),
            password: Password::new("gophers").unwrap(),
            password_confirm: Password::new("gophers").unwrap(),
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_identity_and_timestamps() {
        let (_, svc) = service();
        let req = request(admin());

        let a = svc
            .create_user(new_user("a@example.com"), req.clone())
            .await
            .unwrap();
        let b = svc
            .create_user(new_user("b@example.com"), req.clone())
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.enabled);
        assert_eq!(a.date_created, req.now);
        assert_eq!(a.date_updated, req.now);
        assert_eq!(a.name, "John Doe");
    }

    #[tokio::test]
    async fn create_never_stores_the_plaintext() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        assert_ne!(user.password_hash.as_str(), "gophers");
        let hasher = PlainHasher;
        let good = Password::new("gophers").unwrap();
        let bad = Password::new("ferrises").unwrap();
        assert!(hasher.verify(&good, &user.password_hash).unwrap());
        assert!(!hasher.verify(&bad, &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn create_rejects_mismatched_confirmation() {
        let (store, svc) = service();
        let mut nu = new_user("a@example.com");
        nu.password_confirm = Password::new("different").unwrap();

        let err = svc.create_user(nu, request(admin())).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::PasswordMismatch)
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn create_defaults_empty_roles() {
        let (_, svc) = service();
        let mut nu = new_user("a@example.com");
        nu.roles = Vec::new();

        let user = svc.create_user(nu, request(admin())).await.unwrap();
        assert_eq!(user.roles, vec![Role::User]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_on_create() {
        let (_, svc) = service();
        svc.create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let err = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::DuplicateKey));
    }

    #[tokio::test]
    async fn admin_updates_any_record() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let update = UserUpdate { name: Some("JD".into()), ..Default::default() };
        let updated = svc
            .update_user(user.id.clone(), update, request(admin()))
            .await
            .unwrap();

        assert_eq!(updated.name, "JD");
        assert_eq!(updated.id, user.id);
    }

    #[tokio::test]
    async fn subject_updates_own_record_without_admin_role() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let claims = Claims {
            subject: Some(user.id.clone()),
            roles: vec![Role::User],
        };
        let update = UserUpdate { name: Some("JD".into()), ..Default::default() };
        let updated = svc
            .update_user(user.id.clone(), update, request(claims))
            .await
            .unwrap();
        assert_eq!(updated.name, "JD");
    }

    #[tokio::test]
    async fn foreign_caller_is_rejected_before_storage() {
        let (store, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();
        let before = store.calls().len();

        let claims = Claims {
            subject: Some(UserId::generate()),
            roles: vec![Role::User],
        };
        let update = UserUpdate { name: Some("JD".into()), ..Default::default() };
        let err = svc
            .update_user(user.id.clone(), update, request(claims))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Unauthorized));
        assert_eq!(err.to_string(), "Unauthorized action");
        assert_eq!(store.calls().len(), before);
    }

    #[tokio::test]
    async fn update_stamps_date_updated_and_rehashes_password() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let later = Utc.with_ymd_and_hms(2018, 10, 2, 0, 0, 0).unwrap();
        let update = UserUpdate {
            password: Some(Password::new("newsecret").unwrap()),
            password_confirm: Some(Password::new("newsecret").unwrap()),
            ..Default::default()
        };
        let updated = svc
            .update_user(
                user.id.clone(),
                update,
                GenericRequest::new(admin(), later),
            )
            .await
            .unwrap();

        assert_eq!(updated.date_updated, later);
        assert!(updated.date_updated >= updated.date_created);
        let hasher = PlainHasher;
        let pwd = Password::new("newsecret").unwrap();
        assert!(hasher.verify(&pwd, &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn update_rejects_empty_role_set() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let update =
            UserUpdate { roles: Some(Vec::new()), ..Default::default() };
        let err = svc
            .update_user(user.id.clone(), update, request(admin()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::EmptyRoles)
        ));
    }

    #[tokio::test]
    async fn delete_returns_prior_record_then_lookup_misses() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let removed = svc
            .delete_user(user.id.clone(), request(admin()))
            .await
            .unwrap();
        assert_eq!(removed, user);

        let err = svc
            .query_user_by_id(user.id.clone(), request(admin()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound));
    }

    #[tokio::test]
    async fn lookups_propagate_not_found() {
        let (_, svc) = service();

        let by_id = svc
            .query_user_by_id(UserId::generate(), request(admin()))
            .await;
        assert!(matches!(by_id, Err(ApplicationError::NotFound)));

        let email = EmailAddress::parse("ghost@example.com").unwrap();
        let by_email =
            svc.query_user_by_email(email, request(admin())).await;
        assert!(matches!(by_email, Err(ApplicationError::NotFound)));
    }

    #[tokio::test]
    async fn create_then_query_round_trips() {
        let (_, svc) = service();
        let created = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let fetched = svc
            .query_user_by_id(created.id.clone(), request(admin()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn query_filters_and_paginates() {
        let (_, svc) = service();
        for i in 0..3 {
            let mut nu = new_user(&format!("u{i}@example.com"));
            nu.department = if i == 0 { "sales".into() } else { "platform".into() };
            svc.create_user(nu, request(admin())).await.unwrap();
        }

        let filter = UserFilter {
            department: Some("platform".into()),
            ..Default::default()
        };
        let users = svc
            .query_user(filter.clone(), Page::default(), request(admin()))
            .await
            .unwrap();
        assert_eq!(users.len(), 2);

        let first_page = svc
            .query_user(filter, Page::new(1, 1), request(admin()))
            .await
            .unwrap();
        assert_eq!(first_page.len(), 1);

        let none = svc
            .query_user(
                UserFilter {
                    enabled: Some(false),
                    ..Default::default()
                },
                Page::default(),
                request(admin()),
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn authenticate_succeeds_with_correct_credentials() {
        let (_, svc) = service();
        let created = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let identity = svc
            .authenticate(
                EmailAddress::parse("a@example.com").unwrap(),
                Password::new("gophers").unwrap(),
                request(Claims::default()),
            )
            .await
            .unwrap();

        assert_eq!(identity.id, created.id);
        assert_eq!(identity.roles, created.roles);
    }

    #[tokio::test]
    async fn authenticate_failures_are_indistinguishable() {
        let (_, svc) = service();
        svc.create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let wrong_password = svc
            .authenticate(
                EmailAddress::parse("a@example.com").unwrap(),
                Password::new("wrong").unwrap(),
                request(Claims::default()),
            )
            .await
            .unwrap_err();
        let unknown_email = svc
            .authenticate(
                EmailAddress::parse("ghost@example.com").unwrap(),
                Password::new("gophers").unwrap(),
                request(Claims::default()),
            )
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.to_string(), "authentication failed");
    }

    #[tokio::test]
    async fn authenticate_rejects_disabled_accounts() {
        let (_, svc) = service();
        let user = svc
            .create_user(new_user("a@example.com"), request(admin()))
            .await
            .unwrap();

        let update =
            UserUpdate { enabled: Some(false), ..Default::default() };
        svc.update_user(user.id, update, request(admin())).await.unwrap();

        let err = svc
            .authenticate(
                EmailAddress::parse("a@example.com").unwrap(),
                Password::new("gophers").unwrap(),
                request(Claims::default()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidCredentials));
    }
}
