//! Database connection management

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Not found")]
    NotFound,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbResult<T> = Result<T, DbError>;

/// Default data directory for the journal database (`~/.gratitude-journal`)
pub fn default_data_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".gratitude-journal")
}

/// Initialize the database connection pool and run migrations
///
/// Migrations complete before the pool is returned, so no caller can
/// observe a partially migrated table. If the on-disk schema predates the
/// version marker and the pending upgrade is the lossy one, the database
/// file is backed up first.
pub fn init_database(data_dir: PathBuf) -> DbResult<DbPool> {
    let db_path = data_dir.join("journal.db");

    // Ensure directory exists
    std::fs::create_dir_all(&data_dir).ok();

    tracing::info!("Initializing database at {:?}", db_path);

    let manager = SqliteConnectionManager::file(&db_path).with_init(|conn| {
        // Enable WAL mode and foreign keys
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA foreign_keys = ON;
            PRAGMA cache_size = -64000;
            PRAGMA synchronous = NORMAL;
        "#,
        )?;
        Ok(())
    });

    let pool = Pool::builder().max_size(10).build(manager)?;

    // Run migrations
    {
        let conn = pool.get()?;

        if super::migrations::lossy_upgrade_pending(&conn)? {
            if let Err(e) = super::migrations::backup_database(&db_path) {
                tracing::warn!("Could not back up database before lossy migration: {}", e);
            }
        }

        super::migrations::run_migrations(&conn)?;
    }

    Ok(pool)
}
