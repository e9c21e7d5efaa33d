//! Reachability probe
//!
//! Issues a real GET against a placeholder endpoint and discards the body.
//! The only contract is "reachable or not".

use std::time::Duration;
use url::Url;

use crate::error::SyncError;
use crate::Result;

pub struct ReachabilityProbe {
    client: reqwest::Client,
    url: Url,
}

impl ReachabilityProbe {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn check(&self) -> Result<()> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SyncError::Network(format!(
                "{} responded with {}",
                self.url, status
            )));
        }

        tracing::debug!(url = %self.url, %status, "Probe reachable");
        Ok(())
    }
}

impl Clone for ReachabilityProbe {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            url: self.url.clone(),
        }
    }
}
