//! Database migrations
//!
//! Schema changes are an ordered list of named, idempotent steps recorded
//! in a `schema_migrations` marker table. Databases created before the
//! marker existed are classified once, by inspecting the shape of the
//! `entries` table, and stamped at the version that shape already
//! satisfies; only genuinely pending steps run after that.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::{DbError, DbResult};

/// On-disk shape of the `entries` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntriesShape {
    /// No entries table at all.
    Absent,
    /// Entries without a `user_id` column; rows cannot be attributed to
    /// any user.
    LegacyNoOwner,
    /// Per-user entries constrained to one row per `(user_id, date)`.
    LegacyUniquePerDay,
    /// Per-user entries, any number of rows per day.
    Current,
}

type MigrationFn = fn(&Connection) -> DbResult<()>;

const MIGRATIONS: &[(i64, &str, MigrationFn)] = &[
    (1, "user_scoped_entries", user_scoped_entries),
    (2, "multiple_entries_per_day", multiple_entries_per_day),
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now')),
            checksum TEXT
        )
    "#,
        [],
    )?;

    stamp_baseline(conn)?;

    for (version, name, apply) in MIGRATIONS {
        let applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?",
                [version],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !applied {
            tracing::info!("Running migration {}: {}", version, name);
            apply(conn)?;
            conn.execute(
                "INSERT INTO schema_migrations (version, name) VALUES (?, ?)",
                rusqlite::params![version, name],
            )?;
            tracing::info!("Applied migration {}: {}", version, name);
        }
    }

    Ok(())
}

/// Record the version an unversioned database already satisfies.
///
/// The first release shipped without a `schema_migrations` table, so an
/// existing database says nothing about which steps have run. Its entries
/// table shape implies the version exactly once; after stamping, shape is
/// never re-derived.
fn stamp_baseline(conn: &Connection) -> DbResult<()> {
    let recorded: i64 =
        conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))?;
    if recorded > 0 {
        return Ok(());
    }

    let implied = match classify_entries_shape(conn)? {
        EntriesShape::Absent | EntriesShape::LegacyNoOwner => 0,
        EntriesShape::LegacyUniquePerDay => 1,
        EntriesShape::Current => MIGRATIONS.len() as i64,
    };

    for (version, name, _) in MIGRATIONS {
        if *version > implied {
            break;
        }
        conn.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?, ?)",
            rusqlite::params![version, name],
        )?;
    }

    if implied > 0 {
        tracing::info!("Stamped pre-existing schema at version {}", implied);
    }

    Ok(())
}

/// True when the next `run_migrations` call will take the lossy branch.
/// Lets startup back the database file up before anything is dropped.
pub(crate) fn lossy_upgrade_pending(conn: &Connection) -> DbResult<bool> {
    if table_exists(conn, "schema_migrations")? {
        let recorded: i64 =
            conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))?;
        if recorded > 0 {
            return Ok(false);
        }
    }
    Ok(classify_entries_shape(conn)? == EntriesShape::LegacyNoOwner)
}

/// Classify the on-disk shape of the `entries` table
pub fn classify_entries_shape(conn: &Connection) -> DbResult<EntriesShape> {
    if !table_exists(conn, "entries")? {
        return Ok(EntriesShape::Absent);
    }
    if !table_has_column(conn, "entries", "user_id")? {
        return Ok(EntriesShape::LegacyNoOwner);
    }
    if has_unique_per_day_index(conn)? {
        return Ok(EntriesShape::LegacyUniquePerDay);
    }
    Ok(EntriesShape::Current)
}

/// Migration 1: scope entries to user accounts
///
/// Creates the users table and the per-user entries table. This schema
/// version still imposed one entry per `(user_id, date)`; migration 2
/// lifts that.
fn user_scoped_entries(conn: &Connection) -> DbResult<()> {
    if classify_entries_shape(conn)? == EntriesShape::LegacyNoOwner {
        discard_unattributable_entries(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            gratitude TEXT NOT NULL DEFAULT '',
            feeling TEXT NOT NULL DEFAULT '',
            on_mind TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(user_id, date),
            FOREIGN KEY (user_id) REFERENCES users(id)
        );
    "#,
    )?;

    Ok(())
}

/// Lossy path: drop a pre-account entries table.
///
/// Rows written before user accounts existed have no owner column, so
/// there is nothing to attribute them to. The count is logged so operators
/// know what was discarded; `init_database` backs the file up first.
fn discard_unattributable_entries(conn: &Connection) -> DbResult<()> {
    let discarded: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;

    conn.execute("DROP TABLE entries", [])?;

    tracing::warn!(
        "Discarded {} journal entries from the pre-account schema; they had no owner and cannot be recovered through the application",
        discarded
    );

    Ok(())
}

/// Migration 2: allow multiple entries per day
fn multiple_entries_per_day(conn: &Connection) -> DbResult<()> {
    // Re-checked so a rerun after a crash mid-upgrade is a no-op
    if !has_unique_per_day_index(conn)? {
        return Ok(());
    }
    relax_per_day_uniqueness(conn)
}

/// Lossless path: rebuild the entries table without the per-day uniqueness
/// constraint, copying every row verbatim (ids, owner, date, text fields,
/// timestamps). The drop and rename are the final statements of the
/// transaction; a failure anywhere earlier rolls back and leaves the
/// original table untouched.
fn relax_per_day_uniqueness(conn: &Connection) -> DbResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        r#"
        CREATE TABLE entries_new (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            gratitude TEXT NOT NULL DEFAULT '',
            feeling TEXT NOT NULL DEFAULT '',
            on_mind TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id)
        );

        INSERT INTO entries_new (id, user_id, date, gratitude, feeling, on_mind, created_at, updated_at)
            SELECT id, user_id, date, gratitude, feeling, on_mind, created_at, updated_at
            FROM entries;

        DROP TABLE entries;
        ALTER TABLE entries_new RENAME TO entries;
        CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_id, date);
    "#,
    )?;

    tx.commit()?;
    Ok(())
}

/// Back up the database file next to itself with a timestamped suffix
pub fn backup_database(db_path: &Path) -> DbResult<PathBuf> {
    if !db_path.exists() {
        return Err(DbError::Migration(format!(
            "Database file does not exist: {}",
            db_path.display()
        )));
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let backup_path = db_path.with_extension(format!("db.backup.{}", timestamp));

    std::fs::copy(db_path, &backup_path)
        .map_err(|e| DbError::Migration(format!("Backup failed: {}", e)))?;

    tracing::info!("Created database backup: {}", backup_path.display());
    Ok(backup_path)
}

fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Detect a unique index over exactly `(user_id, date)`, whether it came
/// from a table-level UNIQUE constraint or an explicit CREATE UNIQUE INDEX
fn has_unique_per_day_index(conn: &Connection) -> DbResult<bool> {
    let mut stmt = conn.prepare("PRAGMA index_list(\"entries\")")?;
    let indexes: Vec<(String, bool)> = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, i64>(2)? != 0))
        })?
        .collect::<Result<_, _>>()?;

    for (name, unique) in indexes {
        if !unique {
            continue;
        }
        let mut info = conn.prepare(&format!("PRAGMA index_info(\"{}\")", name))?;
        let mut columns: Vec<String> = info
            .query_map([], |row| row.get::<_, Option<String>>(2))?
            .filter_map(|r| r.ok().flatten())
            .collect();
        columns.sort();
        if columns == ["date", "user_id"] {
            return Ok(true);
        }
    }

    Ok(false)
}
