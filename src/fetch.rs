//! Repository listing from the hosting API.
//!
//! [`GitHubClient`] calls `GET {api_base}/users/{account}/repos`, following
//! `page=N` until a short page comes back. [`JsonFileSource`] reads a list
//! previously saved by `showcase fetch --write`, so a build can run without
//! the network.
//!
//! Any failure here is fatal to the build: there are no retries.

use crate::config::AccountConfig;
use crate::types::RepositoryRecord;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Page size requested from the API (its maximum).
const PER_PAGE: usize = 100;
/// Stop following pages after this many, whatever the API says.
const MAX_PAGES: usize = 50;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Hosting API error: {url} returned HTTP {status}")]
    RemoteService { url: String, status: u16 },
    #[error("Could not decode repository list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can list an account's repositories.
pub trait RepositorySource {
    fn fetch(&self, account: &AccountConfig) -> Result<Vec<RepositoryRecord>, FetchError>;
}

/// Blocking client for the GitHub REST API.
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    pub fn new(account: &AccountConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&account.accept)?);
        let client = Client::builder()
            .user_agent(account.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch up to `max_pages` pages. The flag is false when the cap was hit
    /// before the API returned a short page.
    fn fetch_pages(
        &self,
        account: &AccountConfig,
        max_pages: usize,
    ) -> Result<(Vec<RepositoryRecord>, bool), FetchError> {
        let url = format!(
            "{}/users/{}/repos",
            account.api_base.trim_end_matches('/'),
            account.name
        );
        let mut repos = Vec::new();

        for page in 1..=max_pages {
            tracing::debug!(%url, page, "fetching repository page");
            let response = self
                .client
                .get(&url)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::RemoteService {
                    url,
                    status: status.as_u16(),
                });
            }

            let body = response.text()?;
            let batch: Vec<RepositoryRecord> = serde_json::from_str(&body)?;
            let last_page = batch.len() < PER_PAGE;
            repos.extend(batch);
            if last_page {
                return Ok((repos, true));
            }
        }
        Ok((repos, false))
    }
}

impl RepositorySource for GitHubClient {
    fn fetch(&self, account: &AccountConfig) -> Result<Vec<RepositoryRecord>, FetchError> {
        let (repos, complete) = self.fetch_pages(account, MAX_PAGES)?;
        if !complete {
            tracing::warn!(
                account = %account.name,
                pages = MAX_PAGES,
                count = repos.len(),
                "stopped at the page limit, repository list may be incomplete"
            );
        }
        tracing::info!(account = %account.name, count = repos.len(), "fetched repositories");
        Ok(repos)
    }
}

/// Repository list read from a JSON file (same shape as the API response).
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RepositorySource for JsonFileSource {
    fn fetch(&self, _account: &AccountConfig) -> Result<Vec<RepositoryRecord>, FetchError> {
        let content = std::fs::read_to_string(&self.path)?;
        let repos: Vec<RepositoryRecord> = serde_json::from_str(&content)?;
        tracing::info!(path = %self.path.display(), count = repos.len(), "loaded repositories from file");
        Ok(repos)
    }
}

/// Save fetched records as pretty JSON for `--repos` builds.
pub fn write_records(path: &Path, repos: &[RepositoryRecord]) -> Result<(), FetchError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(repos)?;
    std::fs::write(path, json)?;
    Ok(())
}
