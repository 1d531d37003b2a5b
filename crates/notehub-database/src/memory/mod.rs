//! In-memory store implementations.
//!
//! Used by development mode and the integration test suite. Each mutating
//! operation runs inside a single write-lock section, giving the same
//! atomicity guarantees as the row-locked SQL statements in the postgres
//! backend.

pub mod note;
pub mod user;

pub use note::MemoryNoteStore;
pub use user::MemoryUserStore;
