//! Entry repository for database operations
//!
//! Every statement is scoped by `user_id`. A lookup that matches an id
//! owned by someone else returns the same `None` as a nonexistent id, so
//! callers cannot learn whether a foreign entry exists.

use rusqlite::params;

use crate::db::{DbPool, DbResult};
use crate::types::{CreateEntryInput, DateSummary, Entry, EntryRow, UpdateEntryInput};

pub struct EntryRepository {
    pool: DbPool,
}

impl EntryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn find_by_id(&self, user_id: i64, id: i64) -> DbResult<Option<Entry>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, date, gratitude, feeling, on_mind, created_at, updated_at
            FROM entries WHERE id = ? AND user_id = ?
        "#,
        )?;

        let row = stmt
            .query_row(params![id, user_id], |row| {
                Ok(EntryRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    date: row.get(2)?,
                    gratitude: row.get(3)?,
                    feeling: row.get(4)?,
                    on_mind: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            })
            .optional()?;

        Ok(row.map(Entry::from))
    }

    /// All of a user's entries for one day, in the order they were written
    pub fn find_by_date(&self, user_id: i64, date: &str) -> DbResult<Vec<Entry>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, date, gratitude, feeling, on_mind, created_at, updated_at
            FROM entries WHERE user_id = ? AND date = ?
            ORDER BY created_at ASC, id ASC
        "#,
        )?;

        let rows = stmt.query_map(params![user_id, date], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: row.get(2)?,
                gratitude: row.get(3)?,
                feeling: row.get(4)?,
                on_mind: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let entries: Vec<Entry> = rows.filter_map(|r| r.ok()).map(Entry::from).collect();

        Ok(entries)
    }

    /// Insert a new entry. Never merges with an existing same-day entry.
    pub fn create(&self, user_id: i64, input: &CreateEntryInput) -> DbResult<Entry> {
        let conn = self.pool.get()?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            r#"
            INSERT INTO entries (user_id, date, gratitude, feeling, on_mind, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
            params![
                user_id,
                input.date,
                input.gratitude,
                input.feeling,
                input.on_mind,
                now,
                now,
            ],
        )?;

        let id = conn.last_insert_rowid();

        self.find_by_id(user_id, id)?
            .ok_or_else(|| rusqlite::Error::QueryReturnedNoRows.into())
    }

    /// Replace the three text fields of an entry. `date` and `created_at`
    /// are immutable; `updated_at` is refreshed. Returns `None` when no
    /// row matches the scoped id.
    pub fn update(&self, user_id: i64, id: i64, input: &UpdateEntryInput) -> DbResult<Option<Entry>> {
        let conn = self.pool.get()?;
        let now = chrono::Utc::now().to_rfc3339();

        let changed = conn.execute(
            r#"
            UPDATE entries SET gratitude = ?, feeling = ?, on_mind = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
        "#,
            params![input.gratitude, input.feeling, input.on_mind, now, id, user_id],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        self.find_by_id(user_id, id)
    }

    /// Delete an entry. Returns whether a row was actually removed.
    pub fn delete(&self, user_id: i64, id: i64) -> DbResult<bool> {
        let conn = self.pool.get()?;
        let changed = conn.execute(
            "DELETE FROM entries WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }

    /// Distinct entry dates for a user, newest first, with per-date counts
    pub fn list_dates(&self, user_id: i64) -> DbResult<Vec<DateSummary>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT date, COUNT(*) AS entry_count
            FROM entries WHERE user_id = ?
            GROUP BY date ORDER BY date DESC
        "#,
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(DateSummary {
                date: row.get(0)?,
                entry_count: row.get(1)?,
            })
        })?;

        let dates: Vec<DateSummary> = rows.filter_map(|r| r.ok()).collect();

        Ok(dates)
    }
}

// Helper trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbPool;
    use r2d2::Pool;
    use r2d2_sqlite::SqliteConnectionManager;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Counter for unique database paths
    static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn create_test_pool() -> DbPool {
        // Use unique path for each test to avoid conflicts
        let counter = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_path = format!("/tmp/test_db_{}_entry_{}.db", std::process::id(), counter);

        // Clean up if exists
        let _ = std::fs::remove_file(&db_path);

        let manager = SqliteConnectionManager::file(&db_path).with_init(|conn| {
            conn.execute_batch(
                r#"
                PRAGMA foreign_keys = ON;
                "#,
            )?;
            Ok(())
        });

        let pool = Pool::builder().max_size(5).build(manager).unwrap();

        // Run migrations
        let conn = pool.get().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();

        pool
    }

    fn seed_user(pool: &DbPool, username: &str) -> i64 {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
            params![username, "hash", chrono::Utc::now().to_rfc3339()],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn sample_input(date: &str) -> CreateEntryInput {
        CreateEntryInput {
            date: date.to_string(),
            gratitude: "morning coffee".to_string(),
            feeling: "rested".to_string(),
            on_mind: "the week ahead".to_string(),
        }
    }

    #[test]
    fn test_create_entry() {
        let pool = create_test_pool();
        let user_id = seed_user(&pool, "ada");
        let repo = EntryRepository::new(pool);

        let created = repo.create(user_id, &sample_input("2024-03-01")).unwrap();

        assert_eq!(created.user_id, user_id);
        assert_eq!(created.date, "2024-03-01");
        assert_eq!(created.gratitude, "morning coffee");
        assert_eq!(created.feeling, "rested");
        assert_eq!(created.on_mind, "the week ahead");
        assert!(created.updated_at >= created.created_at);
    }

    #[test]
    fn test_create_allows_multiple_entries_per_day() {
        let pool = create_test_pool();
        let user_id = seed_user(&pool, "ada");
        let repo = EntryRepository::new(pool);

        let first = repo.create(user_id, &sample_input("2024-03-01")).unwrap();
        let second = repo.create(user_id, &sample_input("2024-03-01")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.find_by_date(user_id, "2024-03-01").unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_id_not_found() {
        let pool = create_test_pool();
        let user_id = seed_user(&pool, "ada");
        let repo = EntryRepository::new(pool);

        let found = repo.find_by_id(user_id, 9999).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_update_replaces_text_fields_only() {
        let pool = create_test_pool();
        let user_id = seed_user(&pool, "ada");
        let repo = EntryRepository::new(pool);

        let created = repo.create(user_id, &sample_input("2024-03-01")).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));

        let updated = repo
            .update(
                user_id,
                created.id,
                &UpdateEntryInput {
                    gratitude: "a quiet evening".to_string(),
                    feeling: String::new(),
                    on_mind: String::new(),
                },
            )
            .unwrap()
            .expect("entry should exist");

        assert_eq!(updated.gratitude, "a quiet evening");
        assert_eq!(updated.feeling, "");
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_delete_reports_whether_row_existed() {
        let pool = create_test_pool();
        let user_id = seed_user(&pool, "ada");
        let repo = EntryRepository::new(pool);

        let created = repo.create(user_id, &sample_input("2024-03-01")).unwrap();

        assert!(repo.delete(user_id, created.id).unwrap());
        assert!(!repo.delete(user_id, created.id).unwrap());
        assert!(repo.find_by_id(user_id, created.id).unwrap().is_none());
    }
}
