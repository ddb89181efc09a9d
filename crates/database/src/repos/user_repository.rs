//! SQLite-backed user repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::UserStore;
use crate::entities::{NewUser, User, UserChanges};
use crate::types::{StoreError, StoreResult};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, is_active, date_joined, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Count all stored users
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_user(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        password_hash: row.try_get("password_hash")?,
        is_active: row.try_get("is_active")?,
        date_joined: row.try_get("date_joined")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (username, email, first_name, last_name, password_hash, is_active, date_joined, updated_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| StoreError::Database("failed to retrieve created user".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user).transpose().map_err(StoreError::from)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose().map_err(StoreError::from)
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> StoreResult<User> {
        if changes.is_empty() {
            return self.find_by_id(id).await?.ok_or(StoreError::UserNotFound);
        }

        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE(?, email),
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound);
        }

        self.find_by_id(id).await?.ok_or(StoreError::UserNotFound)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(map_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }
}
