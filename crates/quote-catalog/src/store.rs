//! Persistence of the quote collection, active filter and last viewed quote
//!
//! Every save is a full snapshot replace; there are no partial updates.

use quote_storage::{Database, Scope};

use crate::error::CatalogError;
use crate::filter::CategoryFilter;
use crate::quote::{default_quotes, Quote};
use crate::Result;

const QUOTES_KEY: &str = "quotes";
const FILTER_KEY: &str = "selectedCategory";
const LAST_VIEWED_KEY: &str = "lastViewedQuote";

pub struct QuoteStore {
    db: Database,
}

impl QuoteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persisted collection, `None` when nothing has been saved.
    /// A payload that no longer parses is reported as `CatalogError::Corrupt`.
    pub fn load_saved(&self) -> Result<Option<Vec<Quote>>> {
        let Some(raw) = self.db.get_item(Scope::Local, QUOTES_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| CatalogError::Corrupt {
                key: QUOTES_KEY,
                source,
            })
    }

    /// Persisted collection, or the default set if none exists.
    pub fn load(&self) -> Result<Vec<Quote>> {
        Ok(self.load_saved()?.unwrap_or_else(default_quotes))
    }

    pub fn save(&self, quotes: &[Quote]) -> Result<()> {
        let json = serde_json::to_string(quotes)?;
        self.db.set_item(Scope::Local, QUOTES_KEY, &json)?;

        tracing::debug!(count = quotes.len(), "Saved quote collection");
        Ok(())
    }

    pub fn load_filter(&self) -> Result<CategoryFilter> {
        Ok(self
            .db
            .get_item(Scope::Local, FILTER_KEY)?
            .map(CategoryFilter::from)
            .unwrap_or_default())
    }

    pub fn save_filter(&self, filter: &CategoryFilter) -> Result<()> {
        self.db.set_item(Scope::Local, FILTER_KEY, filter.as_str())?;
        Ok(())
    }

    /// Last viewed quote of the current session. A corrupted snapshot is
    /// treated as absent.
    pub fn load_last_viewed(&self) -> Result<Option<Quote>> {
        let Some(raw) = self.db.get_item(Scope::Session, LAST_VIEWED_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(quote) => Ok(Some(quote)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupted last viewed quote");
                Ok(None)
            }
        }
    }

    pub fn save_last_viewed(&self, quote: &Quote) -> Result<()> {
        let json = serde_json::to_string(quote)?;
        self.db.set_item(Scope::Session, LAST_VIEWED_KEY, &json)?;
        Ok(())
    }

    /// Remove every persisted key: collection, filter and last viewed quote.
    pub fn clear(&self) -> Result<()> {
        self.db.remove_items(&[
            (Scope::Local, QUOTES_KEY),
            (Scope::Local, FILTER_KEY),
            (Scope::Session, LAST_VIEWED_KEY),
        ])?;

        tracing::info!("Cleared all persisted quote data");
        Ok(())
    }
}

impl Clone for QuoteStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
