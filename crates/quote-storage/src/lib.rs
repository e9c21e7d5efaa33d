//! Quotegen Storage Layer
//!
//! SQLite-backed key-value storage with two scopes:
//! `Local` entries survive restarts, `Session` entries live only as long
//! as the open connection.

mod database;
mod error;
mod migrations;

pub use database::{Database, Scope};
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
