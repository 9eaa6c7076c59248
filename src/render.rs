//! Project card rendering.
//!
//! One card per imaged repository, rendered with
//! [maud](https://maud.lambda.xyz/) so names and descriptions pulled from the
//! API are escaped:
//!
//! ```text
//! <a href="{homepage or repository page}" class="project-card" target="_blank" rel="noopener">
//!   <img src="{name}.jpg" alt="{Title}" class="project-screenshot" loading="lazy">
//!   <div class="project-info">
//!     <div class="project-title">{Title}</div>
//!     <div class="project-description">{description or default}</div>
//!     <ul class="project-topics">…</ul>           (when the repo has topics)
//!     <span class="project-badge">Source only</span> (when there is no live homepage)
//!   </div>
//! </a>
//! ```

use crate::config::CardsConfig;
use crate::naming::display_title;
use crate::types::RepositoryRecord;
use maud::{Markup, html};

/// Where a card links: the homepage when it is live, else the repository page.
pub fn card_link(repo: &RepositoryRecord, has_live_homepage: bool) -> &str {
    match repo.homepage.as_deref() {
        Some(homepage) if has_live_homepage => homepage.trim(),
        _ => &repo.html_url,
    }
}

/// Render the project card for one repository.
pub fn render_project_card(
    repo: &RepositoryRecord,
    image_filename: &str,
    has_live_homepage: bool,
    cards: &CardsConfig,
) -> Markup {
    let title = display_title(&repo.name, &cards.uppercase);
    let description = repo
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(&cards.default_description);
    let topics: Vec<&String> = repo.topics.iter().take(cards.max_topics).collect();

    html! {
        a.project-card href=(card_link(repo, has_live_homepage)) target="_blank" rel="noopener" {
            img.project-screenshot src=(image_filename) alt=(title) loading="lazy";
            div.project-info {
                div.project-title { (title) }
                div.project-description { (description) }
                @if !topics.is_empty() {
                    ul.project-topics {
                        @for topic in &topics {
                            li { (topic) }
                        }
                    }
                }
                @if !has_live_homepage {
                    span.project-badge { (cards.badge) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::repo;

    #[test]
    fn card_links_to_live_homepage() {
        let meal = repo("meal-planner")
            .description("Plan your week")
            .homepage("https://ruthmade.com/meal-planner")
            .build();
        let html = render_project_card(&meal, "meal-planner.jpg", true, &CardsConfig::default())
            .into_string();

        assert!(html.starts_with(
            r#"<a class="project-card" href="https://ruthmade.com/meal-planner" target="_blank" rel="noopener">"#
        ));
        assert!(html.contains(r#"<div class="project-title">Meal Planner</div>"#));
        assert!(html.contains(r#"<div class="project-description">Plan your week</div>"#));
        assert!(html.contains(r#"src="meal-planner.jpg""#));
        assert!(html.contains(r#"alt="Meal Planner""#));
        assert!(!html.contains("project-badge"));
    }

    #[test]
    fn card_without_homepage_links_to_repository_and_shows_badge() {
        let tool = repo("csv-to-json").build();
        let html = render_project_card(&tool, "csv-to-json.jpg", false, &CardsConfig::default())
            .into_string();

        assert!(html.contains(r#"href="https://github.com/ruthmade/csv-to-json""#));
        assert!(html.contains("CSV To JSON"));
        assert!(html.contains(r#"<span class="project-badge">Source only</span>"#));
    }

    #[test]
    fn card_uses_default_description() {
        let tool = repo("tool").description("   ").build();
        let html =
            render_project_card(&tool, "tool.jpg", false, &CardsConfig::default()).into_string();
        assert!(html.contains("A useful tool for families."));
    }

    #[test]
    fn card_lists_topics_up_to_limit() {
        let tool = repo("tool")
            .topics(&["a", "b", "c", "d", "e"])
            .build();
        let html =
            render_project_card(&tool, "tool.jpg", false, &CardsConfig::default()).into_string();
        assert!(html.contains(r#"<ul class="project-topics"><li>a</li>"#));
        assert!(html.contains("<li>d</li>"));
        assert!(!html.contains("<li>e</li>"));
    }

    #[test]
    fn card_omits_topic_list_when_empty() {
        let tool = repo("tool").build();
        let html =
            render_project_card(&tool, "tool.jpg", false, &CardsConfig::default()).into_string();
        assert!(!html.contains("project-topics"));
    }

    #[test]
    fn card_escapes_api_text() {
        let tool = repo("tool")
            .description("<script>alert('xss')</script>")
            .build();
        let html =
            render_project_card(&tool, "tool.jpg", false, &CardsConfig::default()).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn card_link_ignores_homepage_when_not_live() {
        let tool = repo("tool").homepage("tool.example.com").build();
        assert_eq!(card_link(&tool, false), "https://github.com/ruthmade/tool");
    }
}
