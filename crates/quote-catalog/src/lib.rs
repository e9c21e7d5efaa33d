//! Quotegen Catalog
//!
//! The quote model and everything that works on whole collections:
//! - category derivation and filtering
//! - persistence of the collection, active filter and last viewed quote
//! - JSON export/import
//! - the shared collection container every writer goes through

mod collection;
mod error;
mod filter;
mod quote;
mod store;
mod transfer;

pub use collection::QuoteCollection;
pub use error::CatalogError;
pub use filter::{apply_filter, categories_of, CategoryFilter};
pub use quote::{default_quotes, Quote};
pub use store::QuoteStore;
pub use transfer::{export_json, parse_import, EXPORT_FILE_NAME};

pub type Result<T> = std::result::Result<T, CatalogError>;
