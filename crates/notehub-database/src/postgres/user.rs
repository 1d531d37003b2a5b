//! PostgreSQL account store.
//!
//! The counter and refresh-token mutations are single UPDATE statements so
//! that row-level locking serializes concurrent requests against the same
//! account.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::user::{CreateUser, User, UserStatus};

use crate::store::{LoginFailure, UserStore};

/// Account store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new account store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        // Email is the login key and is compared case-sensitively.
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE refresh_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find user by refresh token",
                    e,
                )
            })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::duplicate_email(&data.email)
            }
            e => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn record_login_failure(&self, id: Uuid, threshold: i32) -> AppResult<LoginFailure> {
        let row: Option<(i32, UserStatus)> = sqlx::query_as(
            "UPDATE users SET \
                failed_login_attempts = failed_login_attempts + 1, \
                status = CASE \
                    WHEN failed_login_attempts + 1 >= $2 AND status = 'active' \
                    THEN 'blocked'::user_status ELSE status END, \
                blocked_at = CASE \
                    WHEN failed_login_attempts + 1 >= $2 AND status = 'active' \
                    THEN NOW() ELSE blocked_at END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING failed_login_attempts, status",
        )
        .bind(id)
        .bind(threshold)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record login failure", e)
        })?;

        let (attempts, status) =
            row.ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        Ok(LoginFailure { attempts, status })
    }

    async fn record_login_success(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET \
                failed_login_attempts = 0, \
                last_login_at = NOW(), \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record login success", e)
        })?;
        Ok(())
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET \
                refresh_token = $2, \
                refresh_token_expires_at = $3, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
        })?;
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        // Compare-and-swap on the previous token value: a concurrent
        // rotation that already replaced it leaves this update at zero rows.
        let result = sqlx::query(
            "UPDATE users SET \
                refresh_token = $3, \
                refresh_token_expires_at = $4, \
                updated_at = NOW() \
             WHERE id = $1 AND refresh_token = $2",
        )
        .bind(id)
        .bind(current)
        .bind(next)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rotate refresh token", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_refresh_token(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET \
                refresh_token = NULL, \
                refresh_token_expires_at = NULL, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear refresh token", e)
        })?;
        Ok(())
    }

    async fn unblock(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                status = 'active', \
                failed_login_attempts = 0, \
                blocked_at = NULL, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unblock user", e))
    }
}
