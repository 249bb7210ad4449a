//! Service layer for the journal backend
//!
//! This module contains the business logic services that sit between the
//! transport collaborator and the database layer.

pub mod account_service;
pub mod entry_service;

pub use account_service::{AccountError, AccountService};
pub use entry_service::{EntryError, EntryService};
