//! Placeholder preview markup for repositories without a homepage.
//!
//! The preview is an SVG the size of a screenshot: a two-stop gradient
//! picked from the repository name, the display title, the (truncated)
//! description, and up to a few topic tags drawn as pills along the bottom.
//!
//! Markup is built with maud so every interpolated string is escaped. SVG is
//! XML, so every element is written with a body (`{}`) to get an explicit
//! closing tag; maud's `;` void syntax would leave it unclosed.

use crate::config::SiteConfig;
use crate::naming::{display_title, truncate_description};
use crate::types::RepositoryRecord;
use maud::html;

/// Gradient pairs a placeholder can use, chosen by name hash.
const PALETTE: [(&str, &str); 6] = [
    ("#3a5a80", "#1f2f47"),
    ("#5b7f4a", "#2e4426"),
    ("#8a4f6d", "#4a2439"),
    ("#b0703a", "#5c3516"),
    ("#4a6f7f", "#213840"),
    ("#6d5a8f", "#352a4d"),
];

/// Rough advance width of a tag character at the tag font size.
const TAG_CHAR_WIDTH: u32 = 13;

fn palette_for(name: &str) -> (&'static str, &'static str) {
    let hash = name
        .bytes()
        .fold(2166136261u32, |h, b| (h ^ u32::from(b)).wrapping_mul(16777619));
    PALETTE[hash as usize % PALETTE.len()]
}

/// Build the placeholder SVG document for `repo`.
pub fn placeholder_svg(repo: &RepositoryRecord, config: &SiteConfig) -> String {
    let width = config.capture.width;
    let height = config.capture.height;
    let (from, to) = palette_for(&repo.name);
    let title = display_title(&repo.name, &config.cards.uppercase);
    let description = truncate_description(
        repo.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(&config.cards.default_description),
        config.placeholder.max_description,
    );
    let margin = width / 15;
    let title_y = height * 2 / 5;
    let tag_y = height.saturating_sub(margin + 48);

    let mut tag_x = margin;
    let tags: Vec<(u32, u32, &str)> = repo
        .topics
        .iter()
        .take(config.placeholder.max_topics)
        .map(|topic| {
            let pill_width = topic.chars().count() as u32 * TAG_CHAR_WIDTH + 40;
            let x = tag_x;
            tag_x += pill_width + 16;
            (x, pill_width, topic.as_str())
        })
        .collect();

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(width) height=(height)
            viewBox={ "0 0 " (width) " " (height) } {
            defs {
                linearGradient id="bg" x1="0" y1="0" x2="1" y2="1" {
                    stop offset="0" stop-color=(from) {}
                    stop offset="1" stop-color=(to) {}
                }
            }
            rect width=(width) height=(height) fill="url(#bg)" {}
            text x=(margin) y=(title_y) font-family="Helvetica, Arial, sans-serif"
                font-size="72" font-weight="700" fill="#ffffff" { (title) }
            text x=(margin) y=(title_y + 72) font-family="Helvetica, Arial, sans-serif"
                font-size="32" fill="#ffffff" fill-opacity="0.85" { (description) }
            @for (x, pill_width, topic) in &tags {
                g {
                    rect x=(x) y=(tag_y) width=(pill_width) height="48" rx="24"
                        fill="#ffffff" fill-opacity="0.18" {}
                    text x=(x + pill_width / 2) y=(tag_y + 32) text-anchor="middle"
                        font-family="Helvetica, Arial, sans-serif" font-size="22"
                        fill="#ffffff" { (topic) }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::repo;

    #[test]
    fn svg_contains_title_description_and_size() {
        let svg = placeholder_svg(
            &repo("csv-to-json").description("Convert files").build(),
            &SiteConfig::default(),
        );
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(r#"width="1200""#));
        assert!(svg.contains(r#"height="800""#));
        assert!(svg.contains(r#"viewBox="0 0 1200 800""#));
        assert!(svg.contains(">CSV To JSON</text>"));
        assert!(svg.contains(">Convert files</text>"));
    }

    #[test]
    fn svg_truncates_long_description() {
        let long = "x".repeat(80);
        let svg = placeholder_svg(
            &repo("tool").description(&long).build(),
            &SiteConfig::default(),
        );
        assert!(svg.contains(&format!(">{}...</text>", "x".repeat(60))));
        assert!(!svg.contains(&"x".repeat(61)));
    }

    #[test]
    fn svg_uses_default_description_when_missing() {
        let svg = placeholder_svg(&repo("tool").build(), &SiteConfig::default());
        assert!(svg.contains("A useful tool for families."));
    }

    #[test]
    fn svg_shows_at_most_four_topics() {
        let svg = placeholder_svg(
            &repo("tool")
                .topics(&["one", "two", "three", "four", "five"])
                .build(),
            &SiteConfig::default(),
        );
        assert!(svg.contains(">four</text>"));
        assert!(!svg.contains(">five</text>"));
        assert_eq!(svg.matches("<g>").count(), 4);
    }

    #[test]
    fn svg_escapes_markup_in_text() {
        let svg = placeholder_svg(
            &repo("tool").description("<b>bold</b> & co").build(),
            &SiteConfig::default(),
        );
        assert!(svg.contains("&lt;b&gt;bold&lt;/b&gt; &amp; co"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn svg_elements_are_closed() {
        let svg = placeholder_svg(&repo("tool").topics(&["a"]).build(), &SiteConfig::default());
        assert_eq!(svg.matches("<stop").count(), svg.matches("</stop>").count());
        assert_eq!(svg.matches("<rect").count(), svg.matches("</rect>").count());
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn palette_is_stable_per_name() {
        assert_eq!(palette_for("meal-planner"), palette_for("meal-planner"));
    }
}
