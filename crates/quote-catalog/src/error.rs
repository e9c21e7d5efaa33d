//! Catalog error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Quote text cannot be empty")]
    EmptyText,

    #[error("Quote category cannot be empty")]
    EmptyCategory,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import must be a JSON array of quotes")]
    NotAnArray,

    #[error("Invalid quote at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Stored {key} is corrupted: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] quote_storage::StorageError),
}
