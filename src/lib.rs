//! # showcase
//!
//! Builds a one-page project showcase from a GitHub account. Public
//! repositories become project cards, each with a screenshot of the
//! project's homepage or a generated preview when there is none.
//!
//! # Architecture: One Pass, Two Failure Tiers
//!
//! ```text
//! 1. Fetch     hosting API   →  Vec<RepositoryRecord>
//! 2. Select    records       →  filtered, ordered records
//! 3. Preview   each record   →  dist/{name}.jpg   (screenshot or placeholder)
//! 4. Render    each imaged   →  project card HTML
//! 5. Assemble  template      →  dist/index.html
//! ```
//!
//! Steps 1 and 5 fail the build. Step 3 fails per repository: a repository
//! without an image is simply left off the page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | Hosting API client and file-backed repository source |
//! | [`select`] | Inclusion rules and ordering (pure) |
//! | [`capture`] | Browser and rasterizer backends, placeholder SVG |
//! | [`preview`] | Per-repository image production with skip-on-failure |
//! | [`render`] | Project card HTML using Maud |
//! | [`assemble`] | Template substitution, asset copy, the full build |
//! | [`config`] | `showcase.toml` loading, defaults, validation |
//! | [`naming`] | Display titles and description truncation |
//! | [`types`] | Repository records and build results |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Narrow Seams for External Tools
//!
//! The hosting API, the browser, and the SVG rasterizer sit behind
//! [`fetch::RepositorySource`], [`capture::BrowserBackend`] and
//! [`capture::Rasterizer`]. The build is tested end to end with fakes; only
//! the `#[ignore]`d browser tests start a real Chrome.
//!
//! ## One Browser per Repository
//!
//! Every capture launches and tears down its own headless Chrome. Nothing
//! leaks from one site into the next, and a hung page can only cost its own
//! timeout. Parallelism is opt-in through `processing.max_processes`.
//!
//! ## Maud for Cards and Placeholders
//!
//! Names, descriptions and topics come from an external API, so everything
//! is rendered through Maud's auto-escaping, including the SVG placeholders.

pub mod assemble;
pub mod capture;
pub mod config;
pub mod fetch;
pub mod naming;
pub mod output;
pub mod preview;
pub mod render;
pub mod select;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
