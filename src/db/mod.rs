//! Database layer for the journal backend
//!
//! This module provides database connection management, migrations,
//! and repository implementations for all data access.

pub mod connection;
pub mod migrations;
pub mod repositories;

pub use connection::{default_data_dir, init_database, DbError, DbPool, DbResult};
pub use migrations::{backup_database, run_migrations, EntriesShape};
pub use repositories::{EntryRepository, UserRepository};
