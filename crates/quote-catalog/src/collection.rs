//! Shared quote collection
//!
//! The single in-memory collection. Every writer (add, import, sync, clear)
//! goes through the methods here, and every mutation is persisted as a full
//! snapshot before it becomes visible in memory.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::filter::{apply_filter, categories_of, CategoryFilter};
use crate::quote::{default_quotes, Quote};
use crate::store::QuoteStore;
use crate::Result;

pub struct QuoteCollection {
    /// In-memory collection
    quotes: Arc<RwLock<Vec<Quote>>>,
    /// Persistence
    store: QuoteStore,
}

impl QuoteCollection {
    /// Load the persisted collection. Nothing persisted, or a persisted
    /// payload that no longer parses, yields the default set.
    pub fn open(store: QuoteStore) -> Result<Self> {
        let quotes = match store.load_saved() {
            Ok(Some(quotes)) => quotes,
            Ok(None) => {
                let defaults = default_quotes();
                store.save(&defaults)?;
                defaults
            }
            Err(CatalogError::Corrupt { key, source }) => {
                tracing::warn!(key, error = %source, "Persisted quotes unreadable, using defaults");
                let defaults = default_quotes();
                store.save(&defaults)?;
                defaults
            }
            Err(e) => return Err(e),
        };

        tracing::info!(count = quotes.len(), "Loaded quote collection");

        Ok(Self {
            quotes: Arc::new(RwLock::new(quotes)),
            store,
        })
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn snapshot(&self) -> Vec<Quote> {
        self.quotes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.quotes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.read().is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        categories_of(&self.quotes.read())
    }

    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<Quote> {
        apply_filter(&self.quotes.read(), filter)
    }

    /// Append one quote. Returns the new collection length.
    pub fn add(&self, quote: Quote) -> Result<usize> {
        quote.validate()?;
        self.mutate(|quotes| quotes.push(quote))
    }

    /// Append many quotes at once. Returns the new collection length.
    pub fn append(&self, incoming: Vec<Quote>) -> Result<usize> {
        for quote in &incoming {
            quote.validate()?;
        }
        self.mutate(|quotes| quotes.extend(incoming))
    }

    /// Replace the whole collection.
    pub fn replace_all(&self, replacement: Vec<Quote>) -> Result<()> {
        self.mutate(|quotes| *quotes = replacement)?;
        Ok(())
    }

    /// Empty the collection and wipe every persisted key.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.quotes.write();
        self.store.clear()?;
        guard.clear();
        Ok(())
    }

    fn mutate<F>(&self, f: F) -> Result<usize>
    where
        F: FnOnce(&mut Vec<Quote>),
    {
        let mut guard = self.quotes.write();
        let mut next = guard.clone();
        f(&mut next);
        self.store.save(&next)?;
        *guard = next;
        Ok(guard.len())
    }
}

impl Clone for QuoteCollection {
    fn clone(&self) -> Self {
        Self {
            quotes: Arc::clone(&self.quotes),
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_storage::{Database, Scope};

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    fn open_with(quotes: &[Quote]) -> QuoteCollection {
        let store = QuoteStore::new(Database::open_in_memory().unwrap());
        store.save(quotes).unwrap();
        QuoteCollection::open(store).unwrap()
    }

    #[test]
    fn test_open_fresh_store_uses_and_persists_defaults() {
        let store = QuoteStore::new(Database::open_in_memory().unwrap());
        let collection = QuoteCollection::open(store.clone()).unwrap();

        assert_eq!(collection.snapshot(), default_quotes());
        assert_eq!(store.load_saved().unwrap(), Some(default_quotes()));
    }

    #[test]
    fn test_open_corrupted_store_falls_back_to_defaults() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(Scope::Local, "quotes", "[{oops").unwrap();

        let collection = QuoteCollection::open(QuoteStore::new(db)).unwrap();
        assert_eq!(collection.snapshot(), default_quotes());
    }

    #[test]
    fn test_add_grows_by_one_and_persists() {
        let collection = open_with(&[q("A", "X")]);

        let len = collection.add(q("B", "Y")).unwrap();
        assert_eq!(len, 2);
        assert_eq!(collection.snapshot(), vec![q("A", "X"), q("B", "Y")]);
        assert_eq!(collection.categories(), vec!["X", "Y"]);
        assert_eq!(
            collection.store().load().unwrap(),
            collection.snapshot()
        );
    }

    #[test]
    fn test_add_rejects_invalid_without_effect() {
        let collection = open_with(&[q("A", "X")]);
        let invalid = Quote {
            text: String::new(),
            category: "X".to_string(),
            id: None,
        };

        assert!(collection.add(invalid).is_err());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.store().load().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let collection = open_with(&[q("A", "X")]);
        collection.add(q("A", "X")).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_append_and_replace_all() {
        let collection = open_with(&[q("A", "X"), q("B", "Y")]);

        collection.append(vec![q("C", "Z")]).unwrap();
        assert_eq!(
            collection.snapshot(),
            vec![q("A", "X"), q("B", "Y"), q("C", "Z")]
        );

        collection.replace_all(vec![q("S", "Server")]).unwrap();
        assert_eq!(collection.snapshot(), vec![q("S", "Server")]);
        assert_eq!(collection.store().load().unwrap(), vec![q("S", "Server")]);
    }

    #[test]
    fn test_clear_empties_memory_and_storage() {
        let collection = open_with(&[q("A", "X")]);
        collection.clear().unwrap();

        assert!(collection.is_empty());
        assert!(collection.store().load_saved().unwrap().is_none());
        assert!(collection.filtered(&CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let collection = open_with(&[q("A", "X")]);
        let other = collection.clone();
        other.add(q("B", "Y")).unwrap();
        assert_eq!(collection.len(), 2);
    }
}
