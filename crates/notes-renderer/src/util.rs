//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Extract the language from a fenced code block info string.
///
/// The language is the first word; anything after it (titles, line
/// highlights, attributes) is ignored.
///
/// ```text
/// "tsx title=\"app/page.tsx\"" → Some("tsx")
/// "js{1,3}"                    → Some("js")
/// ""                           → None
/// ```
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    let lang = info
        .split(|c: char| c.is_whitespace() || c == '{' || c == ',')
        .next()
        .unwrap_or_default();
    (!lang.is_empty()).then_some(lang)
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
