//! Build configuration.
//!
//! Everything the pipeline needs to know up front (account name, excluded
//! repositories, capture dimensions, title rules) lives in one immutable
//! [`SiteConfig`] value that is passed down explicitly. Stock defaults
//! reproduce the original site; a `showcase.toml` next to the template
//! overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! [account]
//! name = "ruthmade"
//! api_base = "https://api.github.com"
//! user_agent = "showcase-site-builder"
//! accept = "application/vnd.github.v3+json"
//!
//! [selection]
//! exclude = ["ruthmade.com"]
//! require_homepage = false
//! # homepage_domain = "ruthmade.com"
//!
//! [cards]
//! uppercase = ["api", "csv", "css", "html", "json", "pdf", "sql", "svg", "ui", "url", "xml"]
//! default_description = "A useful tool for families."
//! badge = "Source only"
//! max_topics = 4
//!
//! [capture]
//! width = 1200
//! height = 800
//! quality = 85
//! timeout_secs = 30
//! settle_ms = 1000
//!
//! [placeholder]
//! max_description = 60
//! max_topics = 4
//! rasterizer = "rsvg-convert"
//!
//! [processing]
//! max_processes = 1
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Whose repositories to show and how to reach the hosting API.
    pub account: AccountConfig,
    /// Which repositories make it onto the page.
    pub selection: SelectionConfig,
    /// Project card text rules.
    pub cards: CardsConfig,
    /// Live homepage screenshots.
    pub capture: CaptureConfig,
    /// Synthesized previews for repositories without a homepage.
    pub placeholder: PlaceholderConfig,
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "account.name must not be empty".into(),
            ));
        }
        if !(1..=100).contains(&self.capture.quality) {
            return Err(ConfigError::Validation(
                "capture.quality must be 1-100".into(),
            ));
        }
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(ConfigError::Validation(
                "capture.width and capture.height must be non-zero".into(),
            ));
        }
        if self.capture.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "capture.timeout_secs must be non-zero".into(),
            ));
        }
        if self.placeholder.max_description == 0 {
            return Err(ConfigError::Validation(
                "placeholder.max_description must be non-zero".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountConfig {
    /// Account whose public repositories are listed.
    pub name: String,
    /// Hosting API root, without trailing slash.
    pub api_base: String,
    /// Sent as `User-Agent`; the API rejects requests without one.
    pub user_agent: String,
    /// Sent as `Accept` to pin the API version.
    pub accept: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            name: "ruthmade".to_string(),
            api_base: "https://api.github.com".to_string(),
            user_agent: "showcase-site-builder".to_string(),
            accept: "application/vnd.github.v3+json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Repository names never shown, compared exactly.
    pub exclude: Vec<String>,
    /// When set, a homepage only qualifies if its host is this domain or a
    /// subdomain of it.
    pub homepage_domain: Option<String>,
    /// Drop repositories without a qualifying homepage instead of giving them
    /// a placeholder card.
    pub require_homepage: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["ruthmade.com".to_string()],
            homepage_domain: None,
            require_homepage: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    /// Name segments rendered fully uppercase in titles (matched case-insensitively).
    pub uppercase: Vec<String>,
    /// Shown when a repository has no description.
    pub default_description: String,
    /// Badge text on cards for repositories without a live homepage.
    pub badge: String,
    /// Topic tags listed on a card.
    pub max_topics: usize,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            uppercase: [
                "api", "csv", "css", "html", "json", "pdf", "sql", "svg", "ui", "url", "xml",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            default_description: "A useful tool for families.".to_string(),
            badge: "Source only".to_string(),
            max_topics: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    /// JPEG quality (1-100).
    pub quality: u32,
    /// Navigation timeout.
    pub timeout_secs: u64,
    /// Extra wait after load for animations and late content.
    pub settle_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            quality: 85,
            timeout_secs: 30,
            settle_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    /// Description characters kept before an ellipsis is appended.
    pub max_description: usize,
    pub max_topics: usize,
    /// SVG → PNG converter, invoked as `<rasterizer> -w W -h H -f png -o OUT IN`.
    pub rasterizer: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            max_description: 60,
            max_topics: 4,
            rasterizer: "rsvg-convert".to_string(),
        }
    }
}

/// Parallel preview production settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Repositories imaged at once. Each worker runs its own browser, so the
    /// default stays at one.
    pub max_processes: Option<usize>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_processes: Some(1),
        }
    }
}

/// Resolve the effective worker count from config.
///
/// - `None` → all available cores
/// - `Some(n)` → `min(n, cores)`, never below one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.min(cores))
        .unwrap_or(cores)
        .max(1)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock default config as a `toml::Value::Table`, the base layer for
/// user overrides.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` over the stock defaults.
///
/// A missing file is not an error: the stock defaults are returned.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(stock_defaults_value()?, overlay)
}

/// A fully commented stock `showcase.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# showcase configuration
# ======================
# Every setting is optional. Values shown are the defaults.
# Unknown keys are rejected.

# ---------------------------------------------------------------------------
# Account and hosting API
# ---------------------------------------------------------------------------
[account]
# Account whose public repositories are listed.
name = "ruthmade"
api_base = "https://api.github.com"
user_agent = "showcase-site-builder"
accept = "application/vnd.github.v3+json"

# ---------------------------------------------------------------------------
# Repository selection
# ---------------------------------------------------------------------------
[selection]
# Repository names never shown.
exclude = ["ruthmade.com"]
# Drop repositories without a qualifying homepage (no placeholder cards).
require_homepage = false
# Only homepages on this domain (or its subdomains) qualify.
# homepage_domain = "ruthmade.com"

# ---------------------------------------------------------------------------
# Project cards
# ---------------------------------------------------------------------------
[cards]
# Name segments rendered fully uppercase: csv-to-json -> "CSV To JSON".
uppercase = ["api", "csv", "css", "html", "json", "pdf", "sql", "svg", "ui", "url", "xml"]
default_description = "A useful tool for families."
# Badge on cards for repositories without a live homepage.
badge = "Source only"
max_topics = 4

# ---------------------------------------------------------------------------
# Homepage screenshots
# ---------------------------------------------------------------------------
[capture]
width = 1200
height = 800
# JPEG quality (1-100).
quality = 85
timeout_secs = 30
# Extra wait after load so animations and late content settle.
settle_ms = 1000

# ---------------------------------------------------------------------------
# Placeholder previews (repositories without a homepage)
# ---------------------------------------------------------------------------
[placeholder]
# Longer descriptions are cut and get an ellipsis.
max_description = 60
max_topics = 4
# SVG to PNG converter. Falls back to the browser when missing.
rasterizer = "rsvg-convert"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Repositories imaged in parallel, one browser each.
max_processes = 1
"##
}
