//! Repository selection: which repositories get a card, and in what order.
//!
//! ## Inclusion
//!
//! A repository is dropped when it is private, a fork, or named in
//! `selection.exclude`. With `selection.require_homepage` set it is also
//! dropped when it lacks a qualifying homepage.
//!
//! ## Ordering
//!
//! Repositories with a qualifying homepage come first. Within each group the
//! newest `created_at` comes first. The sort is stable, so equal keys keep
//! their input order.
//!
//! Everything here is pure: no I/O, no errors. An empty input yields an
//! empty output.

use crate::config::SelectionConfig;
use crate::types::RepositoryRecord;
use reqwest::Url;
use std::cmp::Reverse;

/// Parse a homepage as an `http`/`https` URL with a host.
///
/// Anything else (bare domains, `mailto:`, garbage) is treated as no homepage.
pub fn live_homepage(homepage: Option<&str>) -> Option<Url> {
    let url = Url::parse(homepage?.trim()).ok()?;
    let is_web = matches!(url.scheme(), "http" | "https");
    (is_web && url.host_str().is_some()).then_some(url)
}

/// Whether a repository's homepage counts as a live external site.
pub fn has_qualifying_homepage(repo: &RepositoryRecord, config: &SelectionConfig) -> bool {
    let Some(url) = live_homepage(repo.homepage.as_deref()) else {
        return false;
    };
    match (&config.homepage_domain, url.host_str()) {
        (None, _) => true,
        (Some(domain), Some(host)) => {
            let domain = domain.trim().to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        }
        (Some(_), None) => false,
    }
}

/// Whether a repository passes the inclusion rules.
pub fn is_included(repo: &RepositoryRecord, config: &SelectionConfig) -> bool {
    if repo.private || repo.fork {
        return false;
    }
    if config.exclude.iter().any(|name| name == &repo.name) {
        return false;
    }
    !config.require_homepage || has_qualifying_homepage(repo, config)
}

/// Filter and order repositories for the page.
pub fn select_repositories(
    repos: Vec<RepositoryRecord>,
    config: &SelectionConfig,
) -> Vec<RepositoryRecord> {
    let mut selected: Vec<RepositoryRecord> = repos
        .into_iter()
        .filter(|repo| is_included(repo, config))
        .collect();
    selected.sort_by_key(|repo| {
        (
            !has_qualifying_homepage(repo, config),
            Reverse(repo.created_at),
        )
    });
    selected
}
