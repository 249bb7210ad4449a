//! Journal entry type definitions

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Database row representation for a journal entry
#[derive(Debug, Clone)]
pub struct EntryRow {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub gratitude: String,
    pub feeling: String,
    pub on_mind: String,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation for a journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub gratitude: String,
    pub feeling: String,
    pub on_mind: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Entry {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            gratitude: row.gratitude,
            feeling: row.feeling,
            on_mind: row.on_mind,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a new entry
///
/// The date is an opaque `YYYY-MM-DD` string chosen by the caller; it is
/// required but never range-checked, so entries may be written for any
/// past or future day. The three text fields default to empty strings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryInput {
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[serde(default)]
    pub gratitude: String,
    #[serde(default)]
    pub feeling: String,
    #[serde(default)]
    pub on_mind: String,
}

/// Input for replacing an entry's text fields
///
/// Update is a full replace: omitted fields become empty strings, they are
/// not merged with the stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryInput {
    #[serde(default)]
    pub gratitude: String,
    #[serde(default)]
    pub feeling: String,
    #[serde(default)]
    pub on_mind: String,
}

/// One day in a user's timeline: a distinct entry date and how many
/// entries were written on it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSummary {
    pub date: String,
    pub entry_count: i64,
}
