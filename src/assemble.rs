//! Site assembly: the whole build, start to finish.
//!
//! ```text
//! template ─┐
//!           ├─ fetch ─▶ select ─▶ [preview ─▶ card] per repo ─▶ substitute ─▶ dist/index.html
//! config ───┘                                                    profile image, assets/ ─▶ dist/
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # template with the marker replaced by project cards
//! ├── meal-planner.jpg    # one preview per imaged repository
//! ├── csv-to-json.jpg
//! ├── profile.jpg         # copied when present
//! └── assets/…            # copied when present
//! ```
//!
//! ## Failure Tiers
//!
//! Pipeline errors (template unreadable, marker missing, API failure) are
//! returned as [`BuildError`] and abort the build. A repository whose preview
//! fails is only left out of the page; see [`crate::preview`].
//!
//! Files already written to the output directory stay there when a build
//! aborts.

use crate::capture::{BrowserBackend, CommandRasterizer, HeadlessChromeBackend, Rasterizer};
use crate::config::{self, SiteConfig};
use crate::fetch::{FetchError, RepositorySource};
use crate::naming::{display_title, image_filename};
use crate::preview::{PreviewOutcome, produce_preview};
use crate::render::render_project_card;
use crate::select::{live_homepage, select_repositories};
use crate::types::{BuildEntry, BuildReport, RepositoryRecord};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

/// Marker comment in the template that the project cards replace.
pub const PROJECTS_MARKER: &str = "<!-- Projects will be inserted here by build script -->";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Template {path} must contain the projects marker exactly once, found {count}")]
    Marker { path: PathBuf, count: usize },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Asset copy failed: {0}")]
    Assets(#[from] walkdir::Error),
    #[error("Could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Filesystem locations the build reads from and writes to.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub template: PathBuf,
    pub output_dir: PathBuf,
    /// Copied into the output when it exists.
    pub profile_image: PathBuf,
    /// Copied recursively into `output_dir/assets` when it exists.
    pub assets_dir: PathBuf,
}

impl SitePaths {
    /// The conventional layout: everything next to the template.
    pub fn in_dir(root: &Path) -> Self {
        Self {
            template: root.join("index.html"),
            output_dir: root.join("dist"),
            profile_image: root.join("profile.jpg"),
            assets_dir: root.join("assets"),
        }
    }
}

/// Progress events, sent as each repository finishes.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    Selected { total: usize, selected: usize },
    RepositoryDone {
        /// 1-based position in selection order.
        index: usize,
        name: String,
        title: String,
        outcome: PreviewOutcome,
    },
}

/// Run the full build against the real browser and rasterizer.
pub fn build(
    source: &dyn RepositorySource,
    paths: &SitePaths,
    config: &SiteConfig,
    progress: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let browser = HeadlessChromeBackend::new();
    let rasterizer = CommandRasterizer::new(&config.placeholder.rasterizer);
    build_with_backends(source, &browser, &rasterizer, paths, config, progress)
}

/// Run the full build with explicit capture backends (allows testing with fakes).
pub fn build_with_backends(
    source: &dyn RepositorySource,
    browser: &impl BrowserBackend,
    rasterizer: &impl Rasterizer,
    paths: &SitePaths,
    config: &SiteConfig,
    progress: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    fs::create_dir_all(&paths.output_dir)?;
    let template = read_template(&paths.template)?;

    let fetched = source.fetch(&config.account)?;
    let total = fetched.len();
    let selected = select_repositories(fetched, &config.selection);
    tracing::info!(total, selected = selected.len(), "selected repositories");
    if let Some(tx) = &progress {
        let _ = tx.send(BuildEvent::Selected {
            total,
            selected: selected.len(),
        });
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config::effective_threads(&config.processing))
        .build()?;
    let outcomes: Vec<PreviewOutcome> = pool.install(|| {
        selected
            .par_iter()
            .enumerate()
            .map(|(i, repo)| {
                let outcome = match profile_collision(repo, &paths.profile_image) {
                    Some(reason) => {
                        tracing::warn!(repo = %repo.name, "{reason}, skipping repository");
                        PreviewOutcome::Skipped { reason }
                    }
                    None => produce_preview(browser, rasterizer, repo, &paths.output_dir, config),
                };
                if let Some(tx) = &progress {
                    let _ = tx.send(BuildEvent::RepositoryDone {
                        index: i + 1,
                        name: repo.name.clone(),
                        title: display_title(&repo.name, &config.cards.uppercase),
                        outcome: outcome.clone(),
                    });
                }
                outcome
            })
            .collect()
    });

    let mut report = BuildReport::default();
    for (repo, outcome) in selected.into_iter().zip(outcomes) {
        match outcome {
            PreviewOutcome::Produced {
                kind,
                image_filename,
            } => {
                let entry = card_entry(repo, image_filename, kind, config);
                report.entries.push(entry);
            }
            PreviewOutcome::Skipped { .. } => report.skipped.push(repo.name),
        }
    }

    let fragments: Vec<&str> = report.entries.iter().map(|e| e.fragment.as_str()).collect();
    let html = template.replacen(PROJECTS_MARKER, &fragments.join("\n"), 1);

    report.profile_copied = copy_profile_image(&paths.profile_image, &paths.output_dir)?;
    report.assets_copied = copy_assets(&paths.assets_dir, &paths.output_dir.join("assets"))?;

    fs::write(paths.output_dir.join("index.html"), html)?;
    tracing::info!(
        cards = report.entries.len(),
        skipped = report.skipped.len(),
        output = %paths.output_dir.display(),
        "build complete"
    );
    Ok(report)
}

fn card_entry(
    repo: RepositoryRecord,
    image_filename: String,
    kind: crate::types::PreviewKind,
    config: &SiteConfig,
) -> BuildEntry {
    let has_live_homepage = live_homepage(repo.homepage.as_deref()).is_some();
    let fragment =
        render_project_card(&repo, &image_filename, has_live_homepage, &config.cards).into_string();
    BuildEntry {
        repo,
        image_filename,
        kind,
        fragment,
    }
}

/// A preview named like the profile picture would be overwritten by the
/// profile copy, so such a repository cannot get a card.
fn profile_collision(repo: &RepositoryRecord, profile: &Path) -> Option<String> {
    if !profile.is_file() {
        return None;
    }
    let preview = image_filename(&repo.name);
    (profile.file_name() == Some(std::ffi::OsStr::new(&preview)))
        .then(|| format!("preview {preview} would be overwritten by the profile picture"))
}

/// Read the template and check it has exactly one projects marker.
pub fn read_template(path: &Path) -> Result<String, BuildError> {
    let template = fs::read_to_string(path).map_err(|source| BuildError::Template {
        path: path.to_path_buf(),
        source,
    })?;
    let count = template.matches(PROJECTS_MARKER).count();
    if count != 1 {
        return Err(BuildError::Marker {
            path: path.to_path_buf(),
            count,
        });
    }
    Ok(template)
}

/// Copy the profile image next to `index.html`. Returns whether it existed.
fn copy_profile_image(profile: &Path, output_dir: &Path) -> Result<bool, BuildError> {
    if !profile.is_file() {
        tracing::warn!(path = %profile.display(), "profile picture not found, skipping");
        return Ok(false);
    }
    let file_name = profile.file_name().unwrap_or(profile.as_os_str());
    fs::copy(profile, output_dir.join(file_name))?;
    Ok(true)
}

/// Copy a static assets directory recursively. Returns the number of files copied.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::backend::tests::MockBrowser;
    use crate::capture::CaptureError;
    use crate::config::AccountConfig;
    use crate::test_helpers::repo;
    use tempfile::TempDir;

    struct StaticSource(Vec<RepositoryRecord>);

    impl RepositorySource for StaticSource {
        fn fetch(&self, _account: &AccountConfig) -> Result<Vec<RepositoryRecord>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl RepositorySource for FailingSource {
        fn fetch(&self, _account: &AccountConfig) -> Result<Vec<RepositoryRecord>, FetchError> {
            Err(FetchError::RemoteService {
                url: "https://api.github.com/users/ruthmade/repos".to_string(),
                status: 500,
            })
        }
    }

    struct UnavailableRasterizer;

    impl Rasterizer for UnavailableRasterizer {
        fn rasterize(&self, _: &Path, _: &Path, _: u32, _: u32) -> Result<(), CaptureError> {
            Err(CaptureError::ToolUnavailable("rsvg-convert".to_string()))
        }
    }

    fn setup(template: &str) -> (TempDir, SitePaths) {
        let tmp = TempDir::new().unwrap();
        let paths = SitePaths::in_dir(tmp.path());
        fs::write(&paths.template, template).unwrap();
        (tmp, paths)
    }

    fn template() -> String {
        format!("<main>\n{PROJECTS_MARKER}\n</main>\n")
    }

    #[test]
    fn read_template_rejects_missing_marker() {
        let (_tmp, paths) = setup("<main></main>");
        assert!(matches!(
            read_template(&paths.template),
            Err(BuildError::Marker { count: 0, .. })
        ));
    }

    #[test]
    fn read_template_rejects_repeated_marker() {
        let (_tmp, paths) = setup(&format!("{PROJECTS_MARKER}{PROJECTS_MARKER}"));
        assert!(matches!(
            read_template(&paths.template),
            Err(BuildError::Marker { count: 2, .. })
        ));
    }

    #[test]
    fn missing_template_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let paths = SitePaths::in_dir(tmp.path());
        let result = build_with_backends(
            &StaticSource(vec![]),
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        );
        assert!(matches!(result, Err(BuildError::Template { .. })));
    }

    #[test]
    fn fetch_failure_is_fatal() {
        let (_tmp, paths) = setup(&template());
        let result = build_with_backends(
            &FailingSource,
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        );
        assert!(matches!(
            result,
            Err(BuildError::Fetch(FetchError::RemoteService { status: 500, .. }))
        ));
    }

    #[test]
    fn cards_follow_selection_order_and_skips_are_reported() {
        let (_tmp, paths) = setup(&template());
        let source = StaticSource(vec![
            repo("older")
                .homepage("https://ruthmade.com/older")
                .created("2023-01-01T00:00:00Z")
                .build(),
            repo("broken")
                .homepage("https://broken.example")
                .created("2024-01-01T00:00:00Z")
                .build(),
            repo("newer")
                .homepage("https://ruthmade.com/newer")
                .created("2024-06-01T00:00:00Z")
                .build(),
        ]);
        let browser = MockBrowser::failing_on(&["broken.example"]);

        let report = build_with_backends(
            &source,
            &browser,
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        )
        .unwrap();

        let names: Vec<&str> = report.entries.iter().map(|e| e.repo.name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
        assert_eq!(report.skipped, vec!["broken"]);

        let html = fs::read_to_string(paths.output_dir.join("index.html")).unwrap();
        let newer = html.find("Newer").unwrap();
        let older = html.find("Older").unwrap();
        assert!(newer < older);
        assert!(!html.contains("broken"));
        assert!(!html.contains(PROJECTS_MARKER));
    }

    #[test]
    fn progress_events_are_sent() {
        let (_tmp, paths) = setup(&template());
        let source = StaticSource(vec![
            repo("one").homepage("https://one.example").build(),
            repo("two").private().build(),
        ]);
        let (tx, rx) = std::sync::mpsc::channel();

        build_with_backends(
            &source,
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            Some(tx),
        )
        .unwrap();

        let events: Vec<BuildEvent> = rx.iter().collect();
        assert!(matches!(
            events[0],
            BuildEvent::Selected {
                total: 2,
                selected: 1
            }
        ));
        assert!(matches!(
            &events[1],
            BuildEvent::RepositoryDone { index: 1, name, .. } if name == "one"
        ));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn profile_image_and_assets_are_copied() {
        let (tmp, paths) = setup(&template());
        fs::write(&paths.profile_image, b"jpeg").unwrap();
        fs::create_dir_all(tmp.path().join("assets/fonts")).unwrap();
        fs::write(tmp.path().join("assets/site.css"), "body{}").unwrap();
        fs::write(tmp.path().join("assets/fonts/a.woff2"), b"font").unwrap();

        let report = build_with_backends(
            &StaticSource(vec![]),
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        )
        .unwrap();

        assert!(report.profile_copied);
        assert_eq!(report.assets_copied, 2);
        assert_eq!(fs::read(paths.output_dir.join("profile.jpg")).unwrap(), b"jpeg");
        assert!(paths.output_dir.join("assets/fonts/a.woff2").is_file());
    }

    #[test]
    fn missing_profile_image_is_not_fatal() {
        let (_tmp, paths) = setup(&template());
        let report = build_with_backends(
            &StaticSource(vec![]),
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        )
        .unwrap();
        assert!(!report.profile_copied);
        assert!(paths.output_dir.join("index.html").is_file());
    }

    #[test]
    fn repository_named_like_profile_picture_is_skipped() {
        let (_tmp, paths) = setup(&template());
        fs::write(&paths.profile_image, b"PROFILE").unwrap();
        let source = StaticSource(vec![
            repo("profile").homepage("https://profile.example").build(),
            repo("meal-planner")
                .homepage("https://ruthmade.com/meal-planner")
                .build(),
        ]);
        let browser = MockBrowser::new();

        let report = build_with_backends(
            &source,
            &browser,
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        )
        .unwrap();

        assert_eq!(report.skipped, vec!["profile"]);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(browser.urls(), vec!["https://ruthmade.com/meal-planner"]);
        assert_eq!(fs::read(paths.output_dir.join("profile.jpg")).unwrap(), b"PROFILE");
        let html = fs::read_to_string(paths.output_dir.join("index.html")).unwrap();
        assert!(!html.contains("https://profile.example"));
    }

    #[test]
    fn repository_named_profile_is_kept_without_profile_picture() {
        let (_tmp, paths) = setup(&template());
        let source = StaticSource(vec![repo("profile").homepage("https://profile.example").build()]);

        let report = build_with_backends(
            &source,
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        )
        .unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(
            fs::read(paths.output_dir.join("profile.jpg")).unwrap(),
            crate::capture::backend::tests::MOCK_JPEG
        );
    }

    #[test]
    fn empty_selection_removes_marker() {
        let (_tmp, paths) = setup(&template());
        build_with_backends(
            &StaticSource(vec![]),
            &MockBrowser::new(),
            &UnavailableRasterizer,
            &paths,
            &SiteConfig::default(),
            None,
        )
        .unwrap();
        let html = fs::read_to_string(paths.output_dir.join("index.html")).unwrap();
        assert_eq!(html, "<main>\n\n</main>\n");
    }
}
