//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notehub_auth::credential::AuthSession;
use notehub_auth::jwt::Claims;
use notehub_entity::note::Note;
use notehub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login / register / refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session token.
    pub token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Session token expiration.
    pub expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            refresh_token: session.refresh_token,
            expires_at: session.expires_at,
            refresh_expires_at: session.refresh_expires_at,
            user: UserResponse::from(&session.user),
        }
    }
}

/// User summary for responses. Never carries the password hash or the
/// refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Status.
    pub status: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            status: user.status.to_string(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Claims echoed back by the validate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfoResponse {
    /// Subject user ID.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

impl From<&Claims> for TokenInfoResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name.clone(),
            email: claims.email.clone(),
            role: claims.role.to_string(),
            expires_at: claims.expires_at(),
        }
    }
}

/// Note representation for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    /// Note ID.
    pub id: Uuid,
    /// Owning user ID.
    pub owner_id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            owner_id: note.owner_id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
