//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use accounts_core::{AccountsError, AccountsResult, NewUser, User, UserId, UserRole};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    role: String,
    name: String,
    email: String,
    password: String,
    image: Option<String>,
    activation_id: Option<String>,
    reset_password_id: Option<String>,
    is_activated: bool,
    is_banned: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountsError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|e| AccountsError::Internal(format!("Invalid role in database: {}", e)))?;

        Ok(User {
            id: UserId::from_string(row.id),
            role,
            name: row.name,
            email: row.email,
            password: row.password,
            image: row.image,
            activation_id: row.activation_id,
            reset_password_id: row.reset_password_id,
            is_activated: row.is_activated,
            is_banned: row.is_banned,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all(&self) -> AccountsResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role, name, email, password, image, activation_id,
                   reset_password_id, is_activated, is_banned, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> AccountsResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role, name, email, password, image, activation_id,
                   reset_password_id, is_activated, is_banned, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AccountsResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role, name, email, password, image, activation_id,
                   reset_password_id, is_activated, is_banned, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: &NewUser) -> AccountsResult<()> {
        debug!("Inserting user: {}", user.id);

        sqlx::query("INSERT INTO users (id, name, email, password) VALUES (?, ?, ?, ?)")
            .bind(user.id.as_str())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .execute(self.pool.inner())
            .await?;

        Ok(())
    }

    async fn update_role(&self, id: &UserId, role: UserRole) -> AccountsResult<u64> {
        debug!("Setting role of user {} to {}", id, role);

        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &UserId) -> AccountsResult<u64> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> AccountsResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
