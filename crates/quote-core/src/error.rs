//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] quote_storage::StorageError),

    #[error("{0}")]
    Catalog(#[from] quote_catalog::CatalogError),

    #[error("Sync error: {0}")]
    Sync(#[from] quote_sync::SyncError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
