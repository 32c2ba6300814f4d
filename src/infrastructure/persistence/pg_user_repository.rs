//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{ProfileRow, UserRow};
use crate::domain::entities::{NewUser, Profile, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const PROFILE_COLUMNS: &str = r#"
    u.id, u.email, u.username, u.first_name, u.last_name, u.avatar,
    EXISTS (
        SELECT 1 FROM follows f WHERE f.user_id = $1::bigint AND f.author_id = u.id
    ) AS is_subscribed
"#;

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, username, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, username, first_name, last_name, password_hash, avatar, created_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, username, first_name, last_name, password_hash, avatar, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, username, first_name, last_name, password_hash, avatar, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn profile(&self, id: i64, viewer: Option<i64>) -> Result<Option<Profile>, AppError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM users u WHERE u.id = $2");

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(viewer)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_profiles(
        &self,
        viewer: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, AppError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM users u ORDER BY u.id LIMIT $2 OFFSET $3");

        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(viewer)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_avatar(
        &self,
        id: i64,
        avatar: Option<String>,
    ) -> Result<Option<String>, AppError> {
        let stored: Option<Option<String>> =
            sqlx::query_scalar("UPDATE users SET avatar = $1 WHERE id = $2 RETURNING avatar")
                .bind(avatar)
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(stored.flatten())
    }
}
