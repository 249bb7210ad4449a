//! Common test utilities and helpers
//!
//! This module provides shared test infrastructure for integration tests.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tempfile::TempDir;

use gratitude_journal::db::{migrations, DbPool};
use gratitude_journal::services::{AccountService, EntryService};

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Test context that holds all resources needed for testing
pub struct TestContext {
    /// Database connection pool
    pub pool: DbPool,
    /// Temporary directory for the database file
    pub temp_dir: TempDir,
    /// Pre-registered user id
    pub user_id: i64,
}

impl TestContext {
    /// Create a new test context with a fresh, migrated database and one
    /// registered user
    pub fn new() -> Self {
        let (pool, temp_dir) = create_empty_test_pool();
        let user_id = seed_user(&pool, "testuser");

        Self {
            pool,
            temp_dir,
            user_id,
        }
    }

    pub fn entry_service(&self) -> EntryService {
        EntryService::new(self.pool.clone())
    }

    pub fn account_service(&self) -> AccountService {
        AccountService::new(self.pool.clone())
    }

    /// Register an additional user and return its id
    pub fn add_user(&self, username: &str) -> i64 {
        seed_user(&self.pool, username)
    }

    /// Get the temporary directory path
    pub fn temp_path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a migrated test pool without any pre-populated data
pub fn create_empty_test_pool() -> (DbPool, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let db_path = temp_dir.path().join(format!("test_db_{}.db", counter));

    let manager = SqliteConnectionManager::file(&db_path).with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(5)
        .build(manager)
        .expect("Failed to create pool");

    let conn = pool.get().expect("Failed to get connection");
    migrations::run_migrations(&conn).expect("Failed to run migrations");

    (pool, temp_dir)
}

/// Insert a user directly and return its id
pub fn seed_user(pool: &DbPool, username: &str) -> i64 {
    let conn = pool.get().expect("Failed to get connection");
    conn.execute(
        "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        rusqlite::params![username, "opaque-hash", chrono::Utc::now().to_rfc3339()],
    )
    .expect("Failed to seed user");
    conn.last_insert_rowid()
}
