//! # notehub-database
//!
//! Store abstractions for the NoteHub auth core and the two backends that
//! implement them:
//!
//! - `postgres` — sqlx-backed repositories for production use
//! - `memory` — in-process repositories for development mode and tests
//!
//! The auth core only ever sees the [`UserStore`] and [`NoteStore`] traits;
//! which backend is behind them is decided once at startup from
//! `DatabaseConfig`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use notehub_core::config::DatabaseConfig;
use notehub_core::error::AppError;

pub use store::{LoginFailure, NoteStore, UserStore};

/// The pair of stores the rest of the application runs against.
#[derive(Clone)]
pub struct Stores {
    /// Account store.
    pub users: Arc<dyn UserStore>,
    /// Note store.
    pub notes: Arc<dyn NoteStore>,
}

/// Build the configured store backend.
///
/// `"postgres"` connects a pool and runs pending migrations; `"memory"`
/// starts empty and loses everything on shutdown.
pub async fn connect_stores(config: &DatabaseConfig) -> Result<Stores, AppError> {
    match config.backend.as_str() {
        "postgres" => {
            let pool = connection::DatabasePool::connect(config).await?;
            migration::run_migrations(pool.pool()).await?;
            Ok(Stores {
                users: Arc::new(postgres::PgUserStore::new(pool.pool().clone())),
                notes: Arc::new(postgres::PgNoteStore::new(pool.into_pool())),
            })
        }
        "memory" => {
            tracing::warn!("Using in-memory stores; all data is lost on restart");
            Ok(Stores {
                users: Arc::new(memory::MemoryUserStore::new()),
                notes: Arc::new(memory::MemoryNoteStore::new()),
            })
        }
        other => Err(AppError::configuration(format!(
            "Unknown database backend: '{other}'. Expected 'postgres' or 'memory'"
        ))),
    }
}
