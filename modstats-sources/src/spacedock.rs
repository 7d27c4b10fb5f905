//! SpaceDock download-log fetcher
//!
//! SpaceDock exposes a per-mod CSV stats export; fetching it is a plain
//! bytes-to-file transfer. Any transport failure or non-success status is
//! fatal to the run, and there are no retries.

use modstats_common::{ModStatsError, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default request timeout for stats exports
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for SpaceDock stats exports
#[derive(Debug, Clone)]
pub struct SpacedockClient {
    client: reqwest::Client,
}

impl SpacedockClient {
    /// Create a new client with the default request timeout
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a new client with the given request timeout
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ModStatsError::fetch_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    /// Download a CSV stats export and save it to `dest`, overwriting any
    /// previous export. The parent directory is created on demand.
    #[instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub async fn download_stats(&self, url: &str, dest: &Path) -> Result<()> {
        debug!("Fetching download log");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModStatsError::fetch_with_source("Failed to read response body", e))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, &bytes)?;

        info!(bytes = bytes.len(), "Saved download log");
        Ok(())
    }
}
