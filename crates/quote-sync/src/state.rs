//! Sync State Machine
//!
//! ```text
//! Idle
//!   ↓ tick / trigger
//! Syncing
//!   ↓ cycle finished (success or failure)
//! Idle
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No cycle in flight
    Idle,
    /// A push/fetch/compare cycle is running
    Syncing,
}

impl SyncState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: SyncState) -> bool {
        matches!(
            (self, target),
            (SyncState::Idle, SyncState::Syncing) | (SyncState::Syncing, SyncState::Idle)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::Syncing => "syncing",
        }
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the status banner shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No cycle has run yet
    Pending,
    Syncing,
    /// Local data already matched the server
    UpToDate,
    /// Server data replaced local data
    Updated { count: usize },
    /// The cycle failed; local data kept
    Failed { reason: String },
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Pending => write!(f, "Waiting for first sync..."),
            SyncStatus::Syncing => write!(f, "Syncing with server..."),
            SyncStatus::UpToDate => write!(f, "Quotes are up to date with the server."),
            SyncStatus::Updated { count } => write!(
                f,
                "Server data replaced local quotes ({} quotes). Conflicts resolved: server wins.",
                count
            ),
            SyncStatus::Failed { reason } => {
                write!(f, "Sync failed ({}). Using local data.", reason)
            }
        }
    }
}
