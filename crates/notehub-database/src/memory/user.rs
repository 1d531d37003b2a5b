//! In-memory account store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_entity::user::{CreateUser, User, UserStatus};

use crate::store::{LoginFailure, UserStore};

/// Account store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-built account, bypassing registration. Test seam.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::duplicate_email(&data.email));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            name: data.name.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            status: UserStatus::Active,
            failed_login_attempts: 0,
            blocked_at: None,
            last_login_at: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn record_login_failure(&self, id: Uuid, threshold: i32) -> AppResult<LoginFailure> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        user.failed_login_attempts += 1;
        if user.failed_login_attempts >= threshold && user.status == UserStatus::Active {
            user.status = UserStatus::Blocked;
            user.blocked_at = Some(Utc::now());
        }
        user.updated_at = Utc::now();

        Ok(LoginFailure {
            attempts: user.failed_login_attempts,
            status: user.status,
        })
    }

    async fn record_login_success(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.failed_login_attempts = 0;
            user.last_login_at = Some(Utc::now());
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.refresh_token = Some(token.to_string());
            user.refresh_token_expires_at = Some(expires_at);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };

        if user.refresh_token.as_deref() != Some(current) {
            return Ok(false);
        }

        user.refresh_token = Some(next.to_string());
        user.refresh_token_expires_at = Some(expires_at);
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn clear_refresh_token(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.refresh_token = None;
            user.refresh_token_expires_at = None;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn unblock(&self, id: Uuid) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        user.status = UserStatus::Active;
        user.failed_login_attempts = 0;
        user.blocked_at = None;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}
