//! Shared test utilities for the showcase test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let meal = repo("meal-planner")
//!     .description("Plan your week")
//!     .homepage("https://ruthmade.com/meal-planner")
//!     .topics(&["food"])
//!     .build();
//! ```

use crate::types::RepositoryRecord;
use chrono::{DateTime, Utc};

/// Start building a public, non-fork repository record named `name`.
pub fn repo(name: &str) -> RepoBuilder {
    RepoBuilder {
        record: RepositoryRecord {
            name: name.to_string(),
            description: None,
            homepage: None,
            created_at: parse_time("2024-01-01T00:00:00Z"),
            private: false,
            fork: false,
            topics: Vec::new(),
            html_url: format!("https://github.com/ruthmade/{name}"),
        },
    }
}

pub struct RepoBuilder {
    record: RepositoryRecord,
}

impl RepoBuilder {
    pub fn description(mut self, text: &str) -> Self {
        self.record.description = Some(text.to_string());
        self
    }

    pub fn homepage(mut self, url: &str) -> Self {
        self.record.homepage = Some(url.to_string());
        self
    }

    pub fn created(mut self, rfc3339: &str) -> Self {
        self.record.created_at = parse_time(rfc3339);
        self
    }

    pub fn topics(mut self, topics: &[&str]) -> Self {
        self.record.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn private(mut self) -> Self {
        self.record.private = true;
        self
    }

    pub fn fork(mut self) -> Self {
        self.record.fork = true;
        self
    }

    pub fn build(self) -> RepositoryRecord {
        self.record
    }
}

fn parse_time(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap_or_else(|e| panic!("bad test timestamp '{rfc3339}': {e}"))
        .with_timezone(&Utc)
}
