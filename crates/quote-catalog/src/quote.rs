//! Quote data structure

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::Result;

/// A single quote. Identity is by content; `id` is only carried by quotes
/// that came from the canonical dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Quote {
    /// Build a user-entered quote. Both fields are trimmed and must be non-empty.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Result<Self> {
        let text: String = text.into();
        let category: String = category.into();
        let quote = Self {
            text: text.trim().to_string(),
            category: category.trim().to_string(),
            id: None,
        };
        quote.validate()?;
        Ok(quote)
    }

    pub fn with_id(id: u64, text: &str, category: &str) -> Self {
        Self {
            text: text.to_string(),
            category: category.to_string(),
            id: Some(id),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(CatalogError::EmptyText);
        }
        if self.category.trim().is_empty() {
            return Err(CatalogError::EmptyCategory);
        }
        Ok(())
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.category)
    }
}

/// Collection used when nothing has been persisted yet.
pub fn default_quotes() -> Vec<Quote> {
    [
        (
            "The only way to do great work is to love what you do.",
            "Motivation",
        ),
        (
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        (
            "In the middle of every difficulty lies opportunity.",
            "Inspiration",
        ),
        ("Simplicity is the ultimate sophistication.", "Wisdom"),
    ]
    .into_iter()
    .map(|(text, category)| Quote {
        text: text.to_string(),
        category: category.to_string(),
        id: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let quote = Quote::new("  Stay hungry.  ", " Motivation ").unwrap();
        assert_eq!(quote.text, "Stay hungry.");
        assert_eq!(quote.category, "Motivation");
        assert!(quote.id.is_none());
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        assert!(matches!(Quote::new("   ", "Life"), Err(CatalogError::EmptyText)));
        assert!(matches!(
            Quote::new("Some text", ""),
            Err(CatalogError::EmptyCategory)
        ));
    }

    #[test]
    fn test_id_is_omitted_when_absent() {
        let quote = Quote::new("A", "X").unwrap();
        let json = serde_json::to_string(&quote).unwrap();
        assert_eq!(json, r#"{"text":"A","category":"X"}"#);

        let with_id = Quote::with_id(7, "A", "X");
        let json = serde_json::to_string(&with_id).unwrap();
        assert!(json.contains("\"id\":7"));
    }

    #[test]
    fn test_default_quotes_are_valid() {
        let quotes = default_quotes();
        assert!(!quotes.is_empty());
        assert!(quotes.iter().all(|q| q.validate().is_ok()));
    }
}
