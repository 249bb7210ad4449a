//! User type definitions
//!
//! The journal core only ever sees a user id; these types belong to the
//! credential store, which owns the username/password-hash records.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Database row representation for a user
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

/// API representation for a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

/// Credential record handed to the authentication gate for verification.
/// Not serializable; it must not cross the transport boundary.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl From<UserRow> for UserCredentials {
    fn from(row: UserRow) -> Self {
        UserCredentials {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

/// Input for registering a new user
///
/// The password hash is computed by the caller; this layer treats it as an
/// opaque string.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "password hash is required"))]
    pub password_hash: String,
}
