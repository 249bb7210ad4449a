//! Entry service for journal entry operations
//!
//! Every operation takes the caller's user id as its scope; the service
//! never authenticates, it only restricts reads and writes to rows owned
//! by the id it is given. A lookup for someone else's entry is
//! indistinguishable from a lookup for a nonexistent one.

use thiserror::Error;
use validator::Validate;

use crate::db::{DbPool, EntryRepository};
use crate::types::{CreateEntryInput, DateSummary, Entry, UpdateEntryInput};

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(String),
}

pub struct EntryService {
    entry_repo: EntryRepository,
}

impl EntryService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            entry_repo: EntryRepository::new(pool),
        }
    }

    /// Create a new entry for the given day. Always inserts; a user may
    /// hold any number of entries for the same date.
    pub fn create_entry(&self, user_id: i64, input: CreateEntryInput) -> Result<Entry, EntryError> {
        input
            .validate()
            .map_err(|e| EntryError::Validation(e.to_string()))?;

        self.entry_repo
            .create(user_id, &input)
            .map_err(|e| EntryError::Database(e.to_string()))
    }

    /// A user's entries for one day, oldest first. An empty day yields an
    /// empty list, not an error.
    pub fn get_entries_by_date(&self, user_id: i64, date: &str) -> Result<Vec<Entry>, EntryError> {
        self.entry_repo
            .find_by_date(user_id, date)
            .map_err(|e| EntryError::Database(e.to_string()))
    }

    pub fn get_entry(&self, user_id: i64, id: i64) -> Result<Option<Entry>, EntryError> {
        self.entry_repo
            .find_by_id(user_id, id)
            .map_err(|e| EntryError::Database(e.to_string()))
    }

    /// Replace an entry's text fields. Returns `None` when the scoped id
    /// matches nothing; callers surface that as not-found.
    pub fn update_entry(
        &self,
        user_id: i64,
        id: i64,
        input: UpdateEntryInput,
    ) -> Result<Option<Entry>, EntryError> {
        self.entry_repo
            .update(user_id, id, &input)
            .map_err(|e| EntryError::Database(e.to_string()))
    }

    /// Delete an entry. The returned flag distinguishes "deleted" from
    /// "nothing to delete".
    pub fn delete_entry(&self, user_id: i64, id: i64) -> Result<bool, EntryError> {
        self.entry_repo
            .delete(user_id, id)
            .map_err(|e| EntryError::Database(e.to_string()))
    }

    /// The user's timeline: distinct dates, newest first, with counts
    pub fn list_entry_dates(&self, user_id: i64) -> Result<Vec<DateSummary>, EntryError> {
        self.entry_repo
            .list_dates(user_id)
            .map_err(|e| EntryError::Database(e.to_string()))
    }
}
