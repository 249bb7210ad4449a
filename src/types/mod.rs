//! Type definitions for the journal backend
//!
//! This module contains all the data types used throughout the crate,
//! including database row types and API response types.

pub mod entry;
pub mod user;

pub use entry::*;
pub use user::*;
