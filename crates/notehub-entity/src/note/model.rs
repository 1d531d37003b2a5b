//! Note entity model.
//!
//! Notes are touched by the auth core only through ownership checks; the
//! invariant is `note.owner_id == subject.id` unless the subject is Admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A note owned by a single account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Unique note identifier.
    pub id: Uuid,
    /// Owning account.
    pub owner_id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// Owning account.
    pub owner_id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
}

/// Data for updating an existing note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNote {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
}
