//! # notehub-entity
//!
//! Domain entities for NoteHub: user accounts, roles, statuses, and notes.

pub mod note;
pub mod user;

pub use note::Note;
pub use user::{User, UserRole, UserStatus};
