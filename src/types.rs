//! Shared types passed between pipeline stages.
//!
//! [`RepositoryRecord`] is deserialized straight from the hosting API's JSON
//! and stays immutable for the rest of the run. [`BuildEntry`] and
//! [`BuildReport`] collect what the assembler produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One repository as returned by `GET /users/{account}/repos`.
///
/// Only the fields the build uses are kept; everything else in the API
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Declared homepage. The API sends `""` for a cleared field, which is
    /// normalized to `None` here.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub homepage: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    /// The repository's page on the hosting site.
    pub html_url: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// How a repository's preview image was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewKind {
    /// Screenshot of the live homepage.
    Captured,
    /// Placeholder rendered from repository metadata.
    Synthesized,
}

/// A successfully imaged repository and the card rendered for it.
#[derive(Debug, Clone, Serialize)]
pub struct BuildEntry {
    pub repo: RepositoryRecord,
    pub image_filename: String,
    pub kind: PreviewKind,
    pub fragment: String,
}

/// Result of a full build, in selection order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub entries: Vec<BuildEntry>,
    /// Names of repositories whose preview could not be produced.
    pub skipped: Vec<String>,
    pub profile_copied: bool,
    pub assets_copied: usize,
}
