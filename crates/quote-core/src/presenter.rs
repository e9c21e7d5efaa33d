//! Random quote selection

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quote_catalog::Quote;

pub const EMPTY_MESSAGE: &str = "No quotes available. Add one or pick another category.";

/// What the quote display shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Quote(Quote),
    Empty,
}

impl Rendered {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Rendered::Quote(quote) => Some(quote),
            Rendered::Empty => None,
        }
    }
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rendered::Quote(quote) => write!(f, "{}", quote),
            Rendered::Empty => f.write_str(EMPTY_MESSAGE),
        }
    }
}

pub struct Presenter {
    rng: Mutex<StdRng>,
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform choice by index; an empty slice renders the empty state.
    pub fn render(&self, quotes: &[Quote]) -> Rendered {
        if quotes.is_empty() {
            return Rendered::Empty;
        }

        let index = self.rng.lock().gen_range(0..quotes.len());
        Rendered::Quote(quotes[index].clone())
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
