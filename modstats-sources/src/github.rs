//! GitHub releases source
//!
//! Lists repository releases, filters them to counted mod releases, derives
//! one download-log row per release, and persists the rows as a CSV with the
//! shared header so they merge identically to the SpaceDock exports.

use crate::log_file::{write_download_log, LogRow};
use chrono::{DateTime, Utc};
use modstats_common::{format_log_timestamp, ModStatsError, Result, VersionKey};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Page size used when listing releases
const PER_PAGE: usize = 100;

/// Configuration for the GitHub API client
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base URL of the GitHub REST API
    pub api_base_url: String,
    /// Access token passed through from the caller
    pub access_token: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            access_token: String::new(),
            owner: String::new(),
            repo: String::new(),
            timeout_secs: 30,
        }
    }
}

impl GithubConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(
        access_token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            owner: owner.into(),
            repo: repo.into(),
            ..Default::default()
        }
    }

    /// Set the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// A release as returned by the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub prerelease: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable asset attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub download_count: u64,
}

/// GitHub API client for listing releases
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    /// Create a new client with the given configuration
    pub fn new(config: GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("modstats"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|e| ModStatsError::config_with_source("Invalid access token", e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ModStatsError::fetch_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo
        )
    }

    /// List all releases of the configured repository, following pagination
    /// until a short page.
    #[instrument(skip(self), fields(owner = %self.config.owner, repo = %self.config.repo))]
    pub async fn list_releases(&self) -> Result<Vec<Release>> {
        let url = self.releases_url();
        let mut releases = Vec::new();
        let mut page = 1usize;

        loop {
            debug!(page, "Requesting releases page");
            let response = self
                .client
                .get(&url)
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())])
                .send()
                .await?
                .error_for_status()?;

            let text = response
                .text()
                .await
                .map_err(|e| ModStatsError::fetch_with_source("Failed to read response body", e))?;
            let batch: Vec<Release> = serde_json::from_str(&text)?;

            let short_page = batch.len() < PER_PAGE;
            releases.extend(batch);
            if short_page {
                break;
            }
            page += 1;
        }

        info!(count = releases.len(), "Fetched releases");
        Ok(releases)
    }

    /// Fetch releases, derive their download-log rows and persist them to
    /// `dest`. Returns the rows that were written.
    pub async fn export_download_log(&self, tag_prefix: &str, dest: &Path) -> Result<Vec<LogRow>> {
        let releases = self.list_releases().await?;
        let rows = release_rows(&releases, tag_prefix)?;
        write_download_log(dest, &rows)?;
        info!(rows = rows.len(), dest = %dest.display(), "Exported GitHub release downloads");
        Ok(rows)
    }
}

/// Derive a mod version string from a release tag.
///
/// Returns `None` when the tag does not start with `tag_prefix`. The prefix
/// and one leading `v` are removed, and the remainder is truncated at the
/// first `-` to drop pre-release/build suffixes.
pub fn mod_version_from_tag<'a>(tag: &'a str, tag_prefix: &str) -> Option<&'a str> {
    let rest = tag.strip_prefix(tag_prefix)?;
    let rest = rest.strip_prefix('v').unwrap_or(rest);
    rest.split('-').next()
}

/// Filter releases and derive one download-log row per counted release.
///
/// Pre-releases and tags without the prefix contribute nothing. The download
/// count is the sum over the release's assets (0 when it has none). A tag
/// whose derived version does not parse aborts the run with the tag named;
/// totals must be exact.
pub fn release_rows(releases: &[Release], tag_prefix: &str) -> Result<Vec<LogRow>> {
    let mut rows = Vec::new();

    for (i, release) in releases.iter().enumerate() {
        if release.prerelease {
            continue;
        }
        let Some(version) = mod_version_from_tag(&release.tag_name, tag_prefix) else {
            continue;
        };

        let parsed: VersionKey = version.parse().map_err(|e| {
            ModStatsError::malformed_record_with_source(
                "github releases",
                (i + 1) as u64,
                format!("tag {:?} derives invalid version {:?}", release.tag_name, version),
                e,
            )
        })?;

        let date = release
            .published_at
            .map(|ts| format_log_timestamp(&ts))
            .unwrap_or_default();
        let downloads: u64 = release.assets.iter().map(|a| a.download_count).sum();

        rows.push(LogRow {
            date,
            downloads,
            // canonical form, so "1.03.0"-style tags normalize on disk
            mod_version: parsed.to_string(),
        });
    }

    Ok(rows)
}
