//! PostgreSQL implementation of the user persistence port.
//!
//! The `users` table keys on the identifier and carries a unique index
//! on the email column; unique violations surface as `DuplicateKey`.

use application::dto::{Page, UserFilter};
use application::ports::outbound::store::{
    StoreError, StoreResult, UserStore,
};
use async_trait::async_trait;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::user::User;
use sqlx::PgPool;

use super::models::UserRecord;

const COLUMNS: &str = "id, name, email, roles, password, department, \
                       enabled, date_created, date_updated";

/// PostgreSQL user store.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new [`PgUserStore`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db)
            if db.code().as_deref() == Some("23505") =>
        {
            StoreError::DuplicateKey
        },
        other => StoreError::backend(other),
    }
}

fn into_user(record: UserRecord) -> StoreResult<User> {
    record.try_into_user().map_err(StoreError::backend)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &User) -> StoreResult<User> {
        let record = UserRecord::from(user);

        let stored = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.roles)
        .bind(&record.password)
        .bind(&record.department)
        .bind(record.enabled)
        .bind(record.date_created)
        .bind(record.date_updated)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_user(stored)
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let record = UserRecord::from(user);

        let stored = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, roles = $4, password = $5,
                department = $6, enabled = $7, date_updated = $8
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.roles)
        .bind(&record.password)
        .bind(&record.department)
        .bind(record.enabled)
        .bind(record.date_updated)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(StoreError::NotFound)?;

        into_user(stored)
    }

    async fn delete(&self, id: &UserId) -> StoreResult<User> {
        let removed = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(StoreError::NotFound)?;

        into_user(removed)
    }

    async fn query_by_id(&self, id: &UserId) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM users
            WHERE id = $1
            "#,
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(StoreError::NotFound)?;

        into_user(record)
    }

    async fn query_by_email(
        &self,
        email: &EmailAddress,
    ) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM users
            WHERE email = $1
            "#,
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(StoreError::NotFound)?;

        into_user(record)
    }

    async fn query(
        &self,
        filter: &UserFilter,
        page: Page,
    ) -> StoreResult<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM users
            WHERE ($1::boolean IS NULL OR enabled = $1)
              AND ($2::text IS NULL OR department = $2)
              AND ($3::text IS NULL OR $3 = ANY(roles))
            ORDER BY date_created, id
            LIMIT $4 OFFSET $5
            "#,
        ))
        .bind(filter.enabled)
        .bind(filter.department.as_deref())
        .bind(filter.role.map(|r| r.as_str()))
        .bind(i64::from(page.rows))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        records.into_iter().map(into_user).collect()
    }
}
