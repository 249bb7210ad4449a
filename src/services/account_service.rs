//! Account service for the credential store
//!
//! Owns username/password-hash records. Hashing is an external
//! capability: callers hand over an already-computed opaque hash and get
//! credentials back for verification. Nothing here inspects hashes.

use thiserror::Error;
use validator::Validate;

use crate::db::{DbPool, UserRepository};
use crate::types::{CreateUserInput, User, UserCredentials};

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Username already taken: {0}")]
    UsernameTaken(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(String),
}

pub struct AccountService {
    user_repo: UserRepository,
}

impl AccountService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            user_repo: UserRepository::new(pool),
        }
    }

    pub fn register(&self, input: CreateUserInput) -> Result<User, AccountError> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        let existing = self
            .user_repo
            .find_by_username(&input.username)
            .map_err(|e| AccountError::Database(e.to_string()))?;
        if existing.is_some() {
            return Err(AccountError::UsernameTaken(input.username));
        }

        let user = self
            .user_repo
            .create(&input.username, &input.password_hash)
            .map_err(|e| AccountError::Database(e.to_string()))?;

        tracing::info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Credential lookup for the authentication gate. `None` for unknown
    /// usernames; the gate decides how to respond.
    pub fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, AccountError> {
        self.user_repo
            .find_by_username(username)
            .map_err(|e| AccountError::Database(e.to_string()))
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>, AccountError> {
        self.user_repo
            .find_by_id(id)
            .map_err(|e| AccountError::Database(e.to_string()))
    }
}
