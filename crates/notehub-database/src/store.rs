//! Store traits the auth core depends on.
//!
//! These are the external collaborators of the credential subsystem: a
//! user-record store and a note-record store. The mutating account
//! operations are deliberately coarse — each one is a single atomic
//! read-modify-write at the backend, so two concurrent requests against the
//! same account can never interleave a failure-counter increment or a
//! refresh-token rotation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use notehub_core::result::AppResult;
use notehub_entity::note::{CreateNote, Note, UpdateNote};
use notehub_entity::user::{CreateUser, User, UserStatus};

/// Outcome of an atomically recorded login failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginFailure {
    /// The failure counter after the increment.
    pub attempts: i32,
    /// The account status after the increment (Blocked once the counter
    /// reaches the threshold).
    pub status: UserStatus,
}

/// Account persistence operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find an account by email. Exact, case-sensitive match.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find the account currently holding the given refresh token value.
    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Create a new account. Fails with `DuplicateEmail` if the email is
    /// already registered.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Atomically increment the failure counter and transition the account
    /// to Blocked if the post-increment counter reaches `threshold`.
    async fn record_login_failure(&self, id: Uuid, threshold: i32) -> AppResult<LoginFailure>;

    /// Reset the failure counter to zero and stamp the last-login time.
    async fn record_login_success(&self, id: Uuid) -> AppResult<()>;

    /// Overwrite the stored refresh token unconditionally (login and
    /// registration issue a fresh token regardless of any prior value).
    async fn store_refresh_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Compare-and-swap refresh token rotation: replaces `current` with
    /// `next` only if `current` is still the stored value. Returns `false`
    /// when the stored value has already moved on (stale rotation).
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Clear the stored refresh token and its expiry. Idempotent.
    async fn clear_refresh_token(&self, id: Uuid) -> AppResult<()>;

    /// Restore a blocked account to Active and reset the failure counter.
    /// Returns the updated account, or `None` if it does not exist.
    async fn unblock(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// Note persistence operations.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Create a new note.
    async fn create(&self, data: &CreateNote) -> AppResult<Note>;

    /// Find a note by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Note>>;

    /// List all notes owned by the given account, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Note>>;

    /// List every note, newest first.
    async fn list_all(&self) -> AppResult<Vec<Note>>;

    /// Update a note. Returns the updated note, or `None` if absent.
    async fn update(&self, id: Uuid, data: &UpdateNote) -> AppResult<Option<Note>>;

    /// Delete a note. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
