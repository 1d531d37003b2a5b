//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::UserStatus;

/// A registered account in the NoteHub system.
///
/// Mutated exclusively through the credential service and the
/// administrative unblock operation; never hard-deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address. Globally unique, compared case-sensitively.
    pub email: String,
    /// Human-readable display name.
    pub name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role (RBAC).
    pub role: UserRole,
    /// Account lifecycle status.
    pub status: UserStatus,
    /// Number of consecutive failed login attempts.
    pub failed_login_attempts: i32,
    /// When the account was blocked by the lockout guard (if blocked).
    pub blocked_at: Option<DateTime<Utc>>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Current refresh token value. Absent when logged out.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// Expiry of the current refresh token.
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account can log in right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Check if the stored refresh token is present and unexpired.
    pub fn has_valid_refresh_token(&self, now: DateTime<Utc>) -> bool {
        match (&self.refresh_token, self.refresh_token_expires_at) {
            (Some(_), Some(expires_at)) => expires_at > now,
            _ => false,
        }
    }

    /// Check if this account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}
