//! Display text derived from repository metadata.
//!
//! ## Titles
//!
//! Repository names are hyphen-separated slugs. Each segment becomes a word:
//! the first letter is capitalized and the rest kept as-is, except for
//! allow-listed tokens (acronyms) which are uppercased entirely:
//!
//! - `csv-to-json` → "CSV To JSON"
//! - `family-budget-tool` → "Family Budget Tool"
//!
//! ## Descriptions
//!
//! Placeholder images have limited room, so descriptions are cut to a
//! character count (not bytes) with `...` appended when cut.

/// Render a repository name as a display title.
///
/// `uppercase` tokens are compared case-insensitively. Empty segments from
/// doubled or trailing hyphens are dropped.
pub fn display_title(name: &str, uppercase: &[String]) -> String {
    name.split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if uppercase.iter().any(|t| t.eq_ignore_ascii_case(segment)) {
                segment.to_uppercase()
            } else {
                capitalize(segment)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
pub fn truncate_description(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Output filename for a repository's preview image.
pub fn image_filename(repo_name: &str) -> String {
    format!("{repo_name}.jpg")
}
