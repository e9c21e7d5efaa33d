//! Canonical quote sources

use async_trait::async_trait;
use std::time::Duration;

use quote_catalog::Quote;

use crate::probe::ReachabilityProbe;
use crate::Result;

/// Where the canonical snapshot comes from.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Offer local state to the source.
    async fn push(&self, local: &[Quote]) -> Result<()>;

    /// Fetch the canonical snapshot.
    async fn fetch(&self) -> Result<Vec<Quote>>;
}

/// The dataset the simulated server always returns.
pub fn canonical_quotes() -> Vec<Quote> {
    vec![
        Quote::with_id(
            1,
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        Quote::with_id(
            2,
            "Don't let yesterday take up too much of today.",
            "Inspiration",
        ),
        Quote::with_id(
            3,
            "It's not whether you get knocked down, it's whether you get up.",
            "Resilience",
        ),
    ]
}

/// Simulated server: artificial delays around a fixed dataset. Nothing
/// pushed is kept. With a probe attached, each call also checks that the
/// probe endpoint is reachable.
pub struct MockServer {
    dataset: Vec<Quote>,
    push_delay: Duration,
    fetch_delay: Duration,
    probe: Option<ReachabilityProbe>,
}

impl MockServer {
    pub fn new(dataset: Vec<Quote>) -> Self {
        Self {
            dataset,
            push_delay: Duration::from_millis(500),
            fetch_delay: Duration::from_millis(1000),
            probe: None,
        }
    }

    pub fn with_delays(mut self, push_delay: Duration, fetch_delay: Duration) -> Self {
        self.push_delay = push_delay;
        self.fetch_delay = fetch_delay;
        self
    }

    pub fn with_probe(mut self, probe: ReachabilityProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    async fn probe(&self) -> Result<()> {
        match &self.probe {
            Some(probe) => probe.check().await,
            None => Ok(()),
        }
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new(canonical_quotes())
    }
}

#[async_trait]
impl QuoteSource for MockServer {
    async fn push(&self, local: &[Quote]) -> Result<()> {
        tokio::time::sleep(self.push_delay).await;
        self.probe().await?;

        tracing::debug!(count = local.len(), "Pushed local quotes (simulated)");
        Ok(())
    }

    async fn fetch(&self) -> Result<Vec<Quote>> {
        tokio::time::sleep(self.fetch_delay).await;
        self.probe().await?;

        tracing::debug!(count = self.dataset.len(), "Fetched canonical quotes (simulated)");
        Ok(self.dataset.clone())
    }
}
