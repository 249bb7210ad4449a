//! Test fixtures and data factories
//!
//! This module provides factory functions for creating test data.

use gratitude_journal::types::{CreateEntryInput, CreateUserInput, UpdateEntryInput};

/// Create an entry input with default text for the given date
pub fn entry_input(date: &str) -> CreateEntryInput {
    CreateEntryInput {
        date: date.to_string(),
        gratitude: "a slow morning".to_string(),
        feeling: "content".to_string(),
        on_mind: "nothing much".to_string(),
    }
}

/// Create an entry input with explicit text fields
pub fn entry_input_with_texts(
    date: &str,
    gratitude: &str,
    feeling: &str,
    on_mind: &str,
) -> CreateEntryInput {
    CreateEntryInput {
        date: date.to_string(),
        gratitude: gratitude.to_string(),
        feeling: feeling.to_string(),
        on_mind: on_mind.to_string(),
    }
}

/// Create an update input replacing all three text fields
pub fn update_input(gratitude: &str, feeling: &str, on_mind: &str) -> UpdateEntryInput {
    UpdateEntryInput {
        gratitude: gratitude.to_string(),
        feeling: feeling.to_string(),
        on_mind: on_mind.to_string(),
    }
}

/// Create a registration input with an opaque stand-in hash
pub fn user_input(username: &str) -> CreateUserInput {
    CreateUserInput {
        username: username.to_string(),
        password_hash: "$argon2id$test-hash".to_string(),
    }
}
