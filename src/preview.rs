//! Preview image production, one repository at a time.
//!
//! ## Path Selection
//!
//! | Homepage | Path | On failure |
//! |---|---|---|
//! | well-formed `http(s)` URL | live screenshot | skipped |
//! | absent or not a web URL | synthesized placeholder | skipped |
//!
//! A homepage whose capture fails is skipped rather than given a
//! placeholder: the card would otherwise link to a live site while showing
//! a "no homepage" preview.
//!
//! ## Placeholder Pipeline
//!
//! ```text
//! {name}.svg ──rasterizer──▶ {name}.png ──image──▶ {name}.jpg
//!      │                                              ▲
//!      └──────── browser (file:// URL) ───────────────┘   (fallback)
//! ```
//!
//! The `.svg` and `.png` intermediates are removed whether or not a JPEG came out.
//!
//! [`produce_preview`] never returns an error: every failure becomes
//! [`PreviewOutcome::Skipped`] with a `warn!` log line.

use crate::capture::{
    BrowserBackend, CaptureError, CaptureParams, Rasterizer, png_to_jpeg, placeholder_svg,
};
use crate::config::SiteConfig;
use crate::naming::image_filename;
use crate::select::live_homepage;
use crate::types::{PreviewKind, RepositoryRecord};
use reqwest::Url;
use std::fs;
use std::path::Path;

/// What happened to one repository's preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Produced {
        kind: PreviewKind,
        image_filename: String,
    },
    /// No image was written; the repository gets no card.
    Skipped { reason: String },
}

impl PreviewOutcome {
    pub fn is_produced(&self) -> bool {
        matches!(self, PreviewOutcome::Produced { .. })
    }
}

/// Produce `{name}.jpg` in `output_dir` for `repo`.
pub fn produce_preview(
    browser: &impl BrowserBackend,
    rasterizer: &impl Rasterizer,
    repo: &RepositoryRecord,
    output_dir: &Path,
    config: &SiteConfig,
) -> PreviewOutcome {
    let filename = image_filename(&repo.name);
    let image_path = output_dir.join(&filename);
    let params = CaptureParams::from_config(&config.capture);

    let result = match live_homepage(repo.homepage.as_deref()) {
        Some(url) => {
            tracing::info!(repo = %repo.name, %url, "capturing homepage");
            capture_homepage(browser, url.as_str(), &image_path, &params)
                .map(|()| PreviewKind::Captured)
        }
        None => {
            tracing::info!(repo = %repo.name, "synthesizing placeholder");
            synthesize_placeholder(browser, rasterizer, repo, output_dir, &params, config)
                .map(|()| PreviewKind::Synthesized)
        }
    };

    match result {
        Ok(kind) => PreviewOutcome::Produced {
            kind,
            image_filename: filename,
        },
        Err(e) => {
            tracing::warn!(repo = %repo.name, error = %e, "preview failed, skipping repository");
            PreviewOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

fn capture_homepage(
    browser: &impl BrowserBackend,
    url: &str,
    image_path: &Path,
    params: &CaptureParams,
) -> Result<(), CaptureError> {
    let bytes = browser.capture(url, params)?;
    fs::write(image_path, bytes)?;
    Ok(())
}

fn synthesize_placeholder(
    browser: &impl BrowserBackend,
    rasterizer: &impl Rasterizer,
    repo: &RepositoryRecord,
    output_dir: &Path,
    params: &CaptureParams,
    config: &SiteConfig,
) -> Result<(), CaptureError> {
    let svg_path = output_dir.join(format!("{}.svg", repo.name));
    let png_path = output_dir.join(format!("{}.png", repo.name));
    let image_path = output_dir.join(image_filename(&repo.name));

    fs::write(&svg_path, placeholder_svg(repo, config))?;

    let rasterized = rasterizer
        .rasterize(&svg_path, &png_path, params.width, params.height)
        .and_then(|()| png_to_jpeg(&png_path, &image_path, params.quality));

    let result = match rasterized {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!(
                repo = %repo.name,
                error = %e,
                "rasterizer failed, rendering placeholder in the browser"
            );
            file_url(&svg_path)
                .and_then(|url| browser.capture(&url, params))
                .and_then(|bytes| Ok(fs::write(&image_path, bytes)?))
        }
    };

    for intermediate in [&png_path, &svg_path] {
        if let Err(e) = remove_if_present(intermediate) {
            tracing::warn!(
                path = %intermediate.display(),
                error = %e,
                "could not remove placeholder intermediate"
            );
        }
    }
    result
}

fn file_url(path: &Path) -> Result<String, CaptureError> {
    let absolute = fs::canonicalize(path)?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| CaptureError::InvalidTarget(absolute.display().to_string()))
}

fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
