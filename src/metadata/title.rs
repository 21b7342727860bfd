//! Document title.

use crate::dom::{self, Document};
use crate::rules::CompiledRules;
use crate::text::{char_len, strip_markers};

/// Titles shorter than this are treated as labels, not headlines.
const MIN_TITLE_CHARS: usize = 5;

/// Headline candidates, most specific first.
const TITLE_SELECTORS: &[&str] = &["article h1", "main h1", "h1", r#"meta[property="og:title"]"#];

/// Pick the article title.
///
/// Tries an `<h1>` inside `<article>`, then inside `<main>`, then the first
/// `<h1>` on the page and `og:title`, rejecting empty, very short and generic
/// section labels. Falls back to the raw `<title>` text.
#[must_use]
pub fn extract_title(doc: &Document, rules: &CompiledRules) -> String {
    for selector in TITLE_SELECTORS {
        let found = doc.select_single(selector);
        if !found.exists() {
            continue;
        }
        let raw = if selector.starts_with("meta") {
            dom::get_attribute(&found, "content").unwrap_or_default()
        } else {
            dom::text_content(&found).to_string()
        };
        let candidate = strip_markers(&raw);
        if is_acceptable_title(&candidate, rules) {
            return candidate;
        }
    }
    document_title(doc)
}

/// Raw `<title>` text, whitespace collapsed.
#[must_use]
pub fn document_title(doc: &Document) -> String {
    let title = doc.select_single("title");
    if title.exists() {
        dom::normalized_text(&title)
    } else {
        String::new()
    }
}

/// Not empty, at least five characters, and not a generic site-section label.
#[must_use]
pub fn is_acceptable_title(candidate: &str, rules: &CompiledRules) -> bool {
    if char_len(candidate) < MIN_TITLE_CHARS {
        return false;
    }
    let lowered = candidate.trim().to_lowercase();
    !rules.tables().generic_titles.iter().any(|g| *g == lowered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::rules::DEFAULT_RULES;

    fn title(html: &str) -> String {
        extract_title(&parse(html), &DEFAULT_RULES)
    }

    #[test]
    fn article_h1_beats_page_h1() {
        let html = "<h1>Site Name Here</h1><article><h1>The Real Headline</h1></article>";
        assert_eq!(title(html), "The Real Headline");
    }

    #[test]
    fn main_h1_when_no_article() {
        let html = "<h1>Site Name Here</h1><main><h1>Main Headline</h1></main>";
        assert_eq!(title(html), "Main Headline");
    }

    #[test]
    fn generic_and_short_titles_are_rejected() {
        let html = "<head><title>Storm closes bridge | Daily</title></head><article><h1>News</h1></article><h1>Hi</h1>";
        assert_eq!(title(html), "Storm closes bridge | Daily");
    }

    #[test]
    fn og_title_before_document_title() {
        let html = r#"<head><meta property="og:title" content="Open Graph Title"><title>Doc</title></head><body></body>"#;
        assert_eq!(title(html), "Open Graph Title");
    }

    #[test]
    fn markers_are_stripped() {
        let html = "<article><h1>Title\u{FFFC} with [OBJ] marker</h1></article>";
        assert_eq!(title(html), "Title with marker");
    }

    #[test]
    fn empty_document_gives_empty_title() {
        assert_eq!(title("<body></body>"), "");
    }
}
