//! Quotegen Sync
//!
//! Periodic reconciliation of the local collection against a canonical
//! source:
//! - the source is simulated (fixed dataset behind artificial delays)
//! - conflicts are resolved by a pluggable strategy, "server wins" by default
//! - at most one cycle runs at a time
//! - progress is published as a status stream for the front end

mod error;
mod probe;
mod reconciler;
mod source;
mod state;
mod strategy;

pub use error::SyncError;
pub use probe::ReachabilityProbe;
pub use reconciler::{Reconciler, SyncOutcome};
pub use source::{canonical_quotes, MockServer, QuoteSource};
pub use state::{SyncState, SyncStatus};
pub use strategy::{ConflictStrategy, Resolution, ServerWins};

pub type Result<T> = std::result::Result<T, SyncError>;
