//! sqlx-backed PostgreSQL store implementations.

pub mod note;
pub mod user;

pub use note::PgNoteStore;
pub use user::PgUserStore;
