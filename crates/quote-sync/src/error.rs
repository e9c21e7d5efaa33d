//! Sync error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid probe URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid sync state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] quote_catalog::CatalogError),
}
