//! Conflict resolution between local and canonical snapshots

use quote_catalog::Quote;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Local state stays as it is
    Keep,
    /// Local state is replaced wholesale
    Replace(Vec<Quote>),
}

pub trait ConflictStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, local: &[Quote], canonical: &[Quote]) -> Resolution;
}

/// The canonical snapshot replaces local state whenever the two differ.
/// No merge, no per-item diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerWins;

impl ConflictStrategy for ServerWins {
    fn name(&self) -> &'static str {
        "server-wins"
    }

    fn resolve(&self, local: &[Quote], canonical: &[Quote]) -> Resolution {
        if local == canonical {
            Resolution::Keep
        } else {
            Resolution::Replace(canonical.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    #[test]
    fn test_equal_snapshots_are_kept() {
        let quotes = vec![q("A", "X"), q("B", "Y")];
        assert_eq!(ServerWins.resolve(&quotes, &quotes), Resolution::Keep);
    }

    #[test]
    fn test_server_replaces_on_any_difference() {
        let local = vec![q("A", "X"), q("B", "Y")];
        let canonical = vec![q("A", "X")];
        assert_eq!(
            ServerWins.resolve(&local, &canonical),
            Resolution::Replace(canonical.clone())
        );

        // Same length, different order
        let reordered = vec![q("B", "Y"), q("A", "X")];
        assert_eq!(
            ServerWins.resolve(&local, &reordered),
            Resolution::Replace(reordered.clone())
        );
    }

    #[test]
    fn test_id_difference_counts() {
        let local = vec![q("A", "X")];
        let canonical = vec![Quote::with_id(1, "A", "X")];
        assert!(matches!(
            ServerWins.resolve(&local, &canonical),
            Resolution::Replace(_)
        ));
    }
}
