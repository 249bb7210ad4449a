//! User repository for database operations
//!
//! This is the credential store. It owns the username/password-hash
//! records; the entry store only ever receives the resulting user id.

use rusqlite::params;

use crate::db::{DbPool, DbResult};
use crate::types::{User, UserCredentials, UserRow};

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn find_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users WHERE id = ?
        "#,
        )?;

        let row = stmt
            .query_row([id], |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .optional()?;

        Ok(row.map(User::from))
    }

    /// Credential lookup for the authentication gate
    pub fn find_by_username(&self, username: &str) -> DbResult<Option<UserCredentials>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users WHERE username = ?
        "#,
        )?;

        let row = stmt
            .query_row([username], |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .optional()?;

        Ok(row.map(UserCredentials::from))
    }

    pub fn create(&self, username: &str, password_hash: &str) -> DbResult<User> {
        let conn = self.pool.get()?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
            params![username, password_hash, now],
        )?;

        let id = conn.last_insert_rowid();

        self.find_by_id(id)?
            .ok_or_else(|| rusqlite::Error::QueryReturnedNoRows.into())
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
