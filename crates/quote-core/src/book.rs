//! Main quote book state container
//!
//! Owns the collection, the active filter, the reconciler and the
//! presenter. All state flows through here; front ends only render.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use quote_catalog::{
    export_json, parse_import, CategoryFilter, Quote, QuoteCollection, QuoteStore,
    EXPORT_FILE_NAME,
};
use quote_storage::Database;
use quote_sync::{
    MockServer, QuoteSource, ReachabilityProbe, Reconciler, ServerWins, SyncOutcome, SyncStatus,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::presenter::{Presenter, Rendered};
use crate::Result;

/// What a front end redraws after the collection changed underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub filter: CategoryFilter,
    pub categories: Vec<String>,
    pub rendered: Rendered,
}

pub struct QuoteBook {
    /// Configuration
    config: Config,
    /// The shared collection
    collection: QuoteCollection,
    /// Active category filter
    filter: Arc<RwLock<CategoryFilter>>,
    /// Background reconciliation
    reconciler: Reconciler,
    presenter: Presenter,
}

impl QuoteBook {
    /// Open the database named by `config` and reconcile against the
    /// simulated server.
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;

        let mut server =
            MockServer::default().with_delays(config.push_delay(), config.fetch_delay());
        if let Some(url) = config.probe_url.as_deref() {
            server = server.with_probe(ReachabilityProbe::new(url, config.probe_timeout())?);
        }

        Self::with_source(config, db, Arc::new(server), Presenter::new())
    }

    pub fn with_source(
        config: Config,
        db: Database,
        source: Arc<dyn QuoteSource>,
        presenter: Presenter,
    ) -> Result<Self> {
        let store = QuoteStore::new(db);
        let filter = store.load_filter()?;
        let collection = QuoteCollection::open(store)?;
        let reconciler = Reconciler::new(collection.clone(), source, Arc::new(ServerWins));

        Ok(Self {
            config,
            collection,
            filter: Arc::new(RwLock::new(filter)),
            reconciler,
            presenter,
        })
    }

    /// Resolve the persisted filter and produce the first display: the
    /// session's last viewed quote when it is still visible, otherwise a
    /// fresh random pick.
    pub fn initialize(&self) -> Result<Rendered> {
        let filter = self.active_filter()?;

        let rendered = match self.last_viewed()? {
            Some(quote) if filter.matches(&quote) => Rendered::Quote(quote),
            _ => self.show_random()?,
        };

        tracing::info!(
            quotes = self.collection.len(),
            filter = %filter,
            "Quote book initialized"
        );

        Ok(rendered)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn collection(&self) -> &QuoteCollection {
        &self.collection
    }

    pub fn quotes(&self) -> Vec<Quote> {
        self.collection.snapshot()
    }

    pub fn categories(&self) -> Vec<String> {
        self.collection.categories()
    }

    // === Filter ===

    /// The effective filter. A category that no longer occurs in the
    /// collection resets the filter to `all`, persistently.
    pub fn active_filter(&self) -> Result<CategoryFilter> {
        let current = self.filter.read().clone();
        let resolved = current.clone().resolve(&self.collection.snapshot());

        if resolved != current {
            tracing::info!(stale = %current, "Active category no longer present, showing all");
            self.set_filter(resolved.clone())?;
        }

        Ok(resolved)
    }

    /// Persist `filter` as the active filter and show a quote from it.
    pub fn select_category(&self, filter: impl Into<CategoryFilter>) -> Result<Rendered> {
        let filter = filter.into();

        if let CategoryFilter::Category(name) = &filter {
            if !self.categories().iter().any(|c| c == name) {
                return Err(CoreError::UnknownCategory(name.clone()));
            }
        }

        self.set_filter(filter)?;
        self.show_random()
    }

    fn set_filter(&self, filter: CategoryFilter) -> Result<()> {
        self.collection.store().save_filter(&filter)?;
        *self.filter.write() = filter;
        Ok(())
    }

    // === Display ===

    /// Pick a random quote from the filtered collection and remember it as
    /// the session's last viewed quote.
    pub fn show_random(&self) -> Result<Rendered> {
        let filter = self.active_filter()?;
        let visible = self.collection.filtered(&filter);
        let rendered = self.presenter.render(&visible);

        if let Rendered::Quote(quote) = &rendered {
            self.collection.store().save_last_viewed(quote)?;
        }

        Ok(rendered)
    }

    /// Filter and render again once a sync has replaced the collection.
    /// Other statuses leave the display alone.
    pub fn refresh_after(&self, status: &SyncStatus) -> Result<Option<View>> {
        if !matches!(status, SyncStatus::Updated { .. }) {
            return Ok(None);
        }

        let rendered = self.show_random()?;
        Ok(Some(View {
            filter: self.active_filter()?,
            categories: self.categories(),
            rendered,
        }))
    }

    pub fn last_viewed(&self) -> Result<Option<Quote>> {
        Ok(self.collection.store().load_last_viewed()?)
    }

    // === Mutations ===

    pub fn add_quote(&self, text: &str, category: &str) -> Result<Quote> {
        let quote = Quote::new(text, category)?;
        let count = self.collection.add(quote.clone())?;

        tracing::info!(category = %quote.category, count, "Added quote");
        Ok(quote)
    }

    /// Append every quote in an import payload. Returns how many were added.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let quotes = parse_import(json)?;
        let imported = quotes.len();
        let count = self.collection.append(quotes)?;

        tracing::info!(imported, count, "Imported quotes");
        Ok(imported)
    }

    /// Read and import a file, then start a reconciliation cycle in the
    /// background.
    pub async fn import_file(&self, path: &Path) -> Result<usize> {
        let json = tokio::fs::read_to_string(path).await?;
        let imported = self.import_json(&json)?;
        self.reconciler.trigger();
        Ok(imported)
    }

    /// Write the collection as `quotes_export.json` into `dir`, or into the
    /// configured export directory.
    pub async fn export_to(&self, dir: Option<&Path>) -> Result<PathBuf> {
        let dir = dir.unwrap_or(self.config.export_dir.as_path());
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(EXPORT_FILE_NAME);
        let json = export_json(&self.collection.snapshot())?;
        tokio::fs::write(&path, json).await?;

        tracing::info!(path = %path.display(), "Exported quotes");
        Ok(path)
    }

    /// Empty the collection and wipe every persisted key.
    pub fn clear(&self) -> Result<()> {
        self.collection.clear()?;
        *self.filter.write() = CategoryFilter::All;
        Ok(())
    }

    // === Sync ===

    pub async fn sync_now(&self) -> SyncOutcome {
        self.reconciler.run_cycle().await
    }

    /// Run a cycle now and then every configured interval.
    pub fn spawn_sync_loop(&self) -> JoinHandle<()> {
        self.reconciler.spawn(self.config.sync_interval())
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.reconciler.status()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.reconciler.subscribe()
    }
}
