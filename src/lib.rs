//! Gratitude Journal - Backend Core
//!
//! This library provides the persistence core for a multi-user daily
//! journal: a SQLite-backed entry store with owner-scoped CRUD, a
//! credential store, and the startup schema migrations that carry old
//! databases forward. Transport, session handling, and rendering live in
//! the embedding host; it talks to this crate through [`AppState`].

pub mod db;
pub mod error;
pub mod services;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use db::DbPool;
use services::{AccountService, EntryService};

/// Application state shared with the embedding host
pub struct AppState {
    /// Database connection pool
    pub pool: DbPool,
    /// Entry service for journal operations
    pub entry_service: Arc<EntryService>,
    /// Account service for the credential store
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Open (or create) the database under `data_dir`, run migrations, and
    /// build the services. Nothing is served until this returns, so no
    /// caller can observe a partially migrated table.
    pub fn initialize(data_dir: PathBuf) -> error::AppResult<AppState> {
        tracing::info!("Data directory: {:?}", data_dir);

        let pool = db::init_database(data_dir)?;

        let entry_service = Arc::new(EntryService::new(pool.clone()));
        let account_service = Arc::new(AccountService::new(pool.clone()));

        Ok(AppState {
            pool,
            entry_service,
            account_service,
        })
    }
}

/// Initialize logging for embedding hosts that have no subscriber of
/// their own. Honors `RUST_LOG`; defaults to INFO.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use types::*;
