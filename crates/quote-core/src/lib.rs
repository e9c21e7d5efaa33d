//! Quotegen Core
//!
//! Central coordination layer. `QuoteBook` owns all state; front ends only
//! issue operations and render what comes back.

mod book;
mod config;
mod error;
mod presenter;

pub use book::{QuoteBook, View};
pub use config::Config;
pub use error::CoreError;
pub use presenter::{Presenter, Rendered, EMPTY_MESSAGE};

// Re-export core components
pub use quote_catalog::{
    apply_filter, categories_of, CatalogError, CategoryFilter, Quote, QuoteCollection,
    EXPORT_FILE_NAME,
};
pub use quote_storage::{Database, StorageError};
pub use quote_sync::{SyncError, SyncOutcome, SyncState, SyncStatus};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
