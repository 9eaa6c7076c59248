//! CLI output formatting.
//!
//! Every repository is shown by its positional index and display title,
//! with URLs and outcomes as indented context lines:
//!
//! ## Check
//!
//! `fetch` prints the same listing under a `Fetched 7 repositories for
//! ruthmade` header instead.
//!
//! ```text
//! Selected 3 of 7 repositories
//! 001 Meal Planner
//!     Homepage: https://ruthmade.com/meal-planner
//!     Plan your week
//! 002 CSV To JSON
//!     Homepage: none (placeholder)
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Meal Planner
//!     Preview: captured → meal-planner.jpg
//! 002 Broken Site
//!     Skipped: Browser error: navigation timed out
//!
//! Built 1 project card, skipped 1 → dist/index.html
//! ```
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers write them to stdout. Diagnostics go through `tracing`
//! on stderr instead.

use crate::assemble::BuildEvent;
use crate::config::SiteConfig;
use crate::naming::{display_title, truncate_description};
use crate::preview::PreviewOutcome;
use crate::select::live_homepage;
use crate::types::{BuildReport, PreviewKind, RepositoryRecord};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn kind_label(kind: PreviewKind) -> &'static str {
    match kind {
        PreviewKind::Captured => "captured",
        PreviewKind::Synthesized => "placeholder",
    }
}

/// Format a repository list with homepage and description context.
pub fn format_repositories(repos: &[RepositoryRecord], config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, repo) in repos.iter().enumerate() {
        let title = display_title(&repo.name, &config.cards.uppercase);
        lines.push(format!("{} {}", format_index(i + 1), title));

        let homepage = match live_homepage(repo.homepage.as_deref()) {
            Some(_) => repo.homepage.as_deref().unwrap_or_default().trim().to_string(),
            None => "none (placeholder)".to_string(),
        };
        lines.push(format!("    Homepage: {}", homepage));

        match repo.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => {
                let desc = truncate_description(desc, config.placeholder.max_description);
                lines.push(format!("    {}", desc));
            }
            _ => {}
        }
    }
    lines
}

/// Format the selection step: counts followed by the selected repositories.
pub fn format_selection(
    total: usize,
    selected: &[RepositoryRecord],
    config: &SiteConfig,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Selected {} of {}",
        selected.len(),
        plural(total, "repository", "repositories")
    )];
    lines.extend(format_repositories(selected, config));
    lines
}

/// Format the unfiltered list returned by `fetch`.
pub fn format_fetched(
    account: &str,
    repos: &[RepositoryRecord],
    config: &SiteConfig,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Fetched {} for {}",
        plural(repos.len(), "repository", "repositories"),
        account
    )];
    lines.extend(format_repositories(repos, config));
    lines
}

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::Selected { total, selected } => {
            vec![format!("Selected {} of {} repositories", selected, total)]
        }
        BuildEvent::RepositoryDone {
            index,
            title,
            outcome,
            ..
        } => {
            let detail = match outcome {
                PreviewOutcome::Produced {
                    kind,
                    image_filename,
                } => format!("    Preview: {} \u{2192} {}", kind_label(*kind), image_filename),
                PreviewOutcome::Skipped { reason } => format!("    Skipped: {}", reason),
            };
            vec![format!("{} {}", format_index(*index), title), detail]
        }
    }
}

/// Format the final summary line(s) of a build.
pub fn format_build_summary(report: &BuildReport, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![String::new()];
    if !report.profile_copied {
        lines.push("Profile picture not found, skipped".to_string());
    }
    if report.assets_copied > 0 {
        lines.push(format!("Copied {}", plural(report.assets_copied, "asset", "assets")));
    }
    lines.push(format!(
        "Built {}, skipped {} \u{2192} {}",
        plural(report.entries.len(), "project card", "project cards"),
        report.skipped.len(),
        output_dir.join("index.html").display()
    ));
    lines
}

/// Print a repository selection to stdout.
pub fn print_selection(total: usize, selected: &[RepositoryRecord], config: &SiteConfig) {
    for line in format_selection(total, selected, config) {
        println!("{}", line);
    }
}

/// Print a fetched repository list to stdout.
pub fn print_fetched(account: &str, repos: &[RepositoryRecord], config: &SiteConfig) {
    for line in format_fetched(account, repos, config) {
        println!("{}", line);
    }
}

/// Print a build summary to stdout.
pub fn print_build_summary(report: &BuildReport, output_dir: &Path) {
    for line in format_build_summary(report, output_dir) {
        println!("{}", line);
    }
}
