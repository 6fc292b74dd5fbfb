//! PostgreSQL user store implementation.

use crate::{traits::UserStore, DatabasePool};
use async_trait::async_trait;
use roster_core::{RosterResult, UserId, UserPatch, UserRecord};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: Arc<DatabasePool>,
}

impl PgUserStore {
    /// Creates a new PostgreSQL user store.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self::new(UserId::new(row.id), row.username, row.email)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, username: &str, email: &str) -> RosterResult<UserId> {
        debug!("Inserting user: {}", username);

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(UserId::new(id))
    }

    async fn fetch_by_id(&self, id: UserId) -> RosterResult<Option<UserRecord>> {
        debug!("Fetching user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn fetch_all(&self) -> RosterResult<Vec<UserRecord>> {
        debug!("Fetching all users");

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn update_by_id(&self, id: UserId, patch: &UserPatch) -> RosterResult<Option<UserRecord>> {
        debug!("Updating user: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = COALESCE($1, username),
                email = COALESCE($2, email)
            WHERE id = $3
            RETURNING id, username, email
            "#,
        )
        .bind(patch.username.as_deref())
        .bind(patch.email.as_deref())
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<Option<UserId>> {
        debug!("Deleting user: {}", id);

        let deleted: Option<i64> = sqlx::query_scalar("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(deleted.map(UserId::new))
    }

    async fn ping(&self) -> RosterResult<bool> {
        let value: i32 = sqlx::query_scalar("SELECT 1").fetch_one(self.pool.inner()).await?;
        Ok(value == 1)
    }
}
