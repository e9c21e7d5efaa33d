//! Category derivation and filtering

use crate::quote::Quote;

/// The active category filter. Persisted as `"all"` or the category name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(name) => name,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => quote.category == *name,
        }
    }

    /// Resolve against the current collection: a category that no longer
    /// occurs falls back to `All`.
    pub fn resolve(self, quotes: &[Quote]) -> Self {
        let stale = matches!(
            &self,
            CategoryFilter::Category(name) if !quotes.iter().any(|q| q.category == *name)
        );
        if stale {
            CategoryFilter::All
        } else {
            self
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(trimmed.to_string())
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct categories in order of first occurrence.
pub fn categories_of(quotes: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in quotes {
        if !categories.iter().any(|c| *c == quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

/// The subsequence of `quotes` the filter admits, order preserved.
pub fn apply_filter(quotes: &[Quote], filter: &CategoryFilter) -> Vec<Quote> {
    quotes.iter().filter(|q| filter.matches(q)).cloned().collect()
}
