//! Reconciler
//!
//! Runs push → fetch → compare → resolve cycles against a `QuoteSource`.
//! A cycle that starts while another is still in flight is skipped.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use quote_catalog::QuoteCollection;

use crate::error::SyncError;
use crate::source::QuoteSource;
use crate::state::{SyncState, SyncStatus};
use crate::strategy::{ConflictStrategy, Resolution};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local data already matched
    Unchanged,
    /// Local data was replaced with the canonical snapshot
    Replaced { count: usize },
    /// The cycle failed; local data kept
    Failed { reason: String },
    /// Another cycle was in flight
    Skipped,
}

pub struct Reconciler {
    collection: QuoteCollection,
    source: Arc<dyn QuoteSource>,
    strategy: Arc<dyn ConflictStrategy>,
    state: Arc<Mutex<SyncState>>,
    status: Arc<watch::Sender<SyncStatus>>,
}

/// Returns the reconciler to `Idle` when the cycle ends, however it ends.
struct CycleGuard {
    state: Arc<Mutex<SyncState>>,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        *self.state.lock() = SyncState::Idle;
    }
}

impl Reconciler {
    pub fn new(
        collection: QuoteCollection,
        source: Arc<dyn QuoteSource>,
        strategy: Arc<dyn ConflictStrategy>,
    ) -> Self {
        let (status, _) = watch::channel(SyncStatus::Pending);

        Self {
            collection,
            source,
            strategy,
            state: Arc::new(Mutex::new(SyncState::Idle)),
            status: Arc::new(status),
        }
    }

    pub fn state(&self) -> SyncState {
        *self.state.lock()
    }

    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Run one reconciliation cycle to completion.
    pub async fn run_cycle(&self) -> SyncOutcome {
        let _guard = match self.begin_cycle() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::debug!(error = %e, "Sync already in flight, skipping");
                return SyncOutcome::Skipped;
            }
        };

        self.publish(SyncStatus::Syncing);

        match self.exchange().await {
            Ok(Resolution::Keep) => {
                tracing::info!(strategy = self.strategy.name(), "Local quotes up to date");
                self.publish(SyncStatus::UpToDate);
                SyncOutcome::Unchanged
            }
            Ok(Resolution::Replace(quotes)) => {
                let count = quotes.len();
                match self.collection.replace_all(quotes) {
                    Ok(()) => {
                        tracing::info!(
                            strategy = self.strategy.name(),
                            count,
                            "Replaced local quotes with canonical snapshot"
                        );
                        self.publish(SyncStatus::Updated { count });
                        SyncOutcome::Replaced { count }
                    }
                    Err(e) => self.fail(e.into()),
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Start one cycle in the background.
    pub fn trigger(&self) -> JoinHandle<SyncOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.run_cycle().await })
    }

    /// Run a cycle immediately and then on every `period`. Each tick starts
    /// its cycle as a separate task, so a slow cycle never delays the
    /// schedule; overlapping ticks are skipped by `run_cycle`.
    pub fn spawn(&self, period: Duration) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                this.trigger();
            }
        })
    }

    async fn exchange(&self) -> Result<Resolution> {
        let local = self.collection.snapshot();
        self.source.push(&local).await?;

        let canonical = self.source.fetch().await?;

        // Local state may have changed while the source was pending
        let current = self.collection.snapshot();
        Ok(self.strategy.resolve(&current, &canonical))
    }

    fn begin_cycle(&self) -> Result<CycleGuard> {
        let mut state = self.state.lock();
        if !state.can_transition_to(SyncState::Syncing) {
            return Err(SyncError::InvalidTransition {
                from: state.to_string(),
                to: SyncState::Syncing.to_string(),
            });
        }
        *state = SyncState::Syncing;

        Ok(CycleGuard {
            state: Arc::clone(&self.state),
        })
    }

    fn fail(&self, error: SyncError) -> SyncOutcome {
        let reason = error.to_string();
        tracing::warn!(error = %reason, "Sync failed, keeping local quotes");
        self.publish(SyncStatus::Failed {
            reason: reason.clone(),
        });
        SyncOutcome::Failed { reason }
    }

    fn publish(&self, status: SyncStatus) {
        self.status.send_replace(status);
    }
}

impl Clone for Reconciler {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            source: Arc::clone(&self.source),
            strategy: Arc::clone(&self.strategy),
            state: Arc::clone(&self.state),
            status: Arc::clone(&self.status),
        }
    }
}
