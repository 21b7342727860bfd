//! Author name.
//!
//! Selector cascade first, then a byline scan inside `<article>`. Values that
//! are URLs or URL slugs are turned into display names.

use crate::dom::{self, Document, NodeRef};
use crate::patterns::{AUTHOR_SELECTORS, BYLINE_NAME, CAPITALIZED_NAME};
use crate::rules::CompiledRules;
use crate::text::{char_len, collapse_whitespace, title_case, word_count};
use crate::url_utils::{looks_like_url, url_slug};

/// Matches inspected per selector before moving on.
const MATCHES_PER_SELECTOR: usize = 3;

/// Longest plausible author string.
const MAX_AUTHOR_CHARS: usize = 100;

/// Longest text scanned for a "by <Name>" byline.
const MAX_BYLINE_CHARS: usize = 120;

/// Words that trail a byline name without being part of it.
const BYLINE_TRAILERS: &[&str] = &["published", "updated", "posted", "on", "at", "and"];

/// Find the article's author, or an empty string.
#[must_use]
pub fn extract_author(doc: &Document, rules: &CompiledRules) -> String {
    for selector in AUTHOR_SELECTORS {
        let matches = doc.select(selector);
        for node in matches.nodes().iter().take(MATCHES_PER_SELECTOR) {
            if let Some(name) = author_from_node(node, rules) {
                return name;
            }
        }
    }
    byline_fallback(doc, rules).unwrap_or_default()
}

fn author_from_node(node: &NodeRef, rules: &CompiledRules) -> Option<String> {
    let sel = dom::selection(node);
    let tag = dom::node_tag(node);

    let raw = if tag == "meta" {
        dom::non_empty_attribute(&sel, "content")?
    } else {
        let text = dom::visible_text(node);
        if text.is_empty() {
            dom::non_empty_attribute(&sel, "href").or_else(|| dom::non_empty_attribute(&sel, "content"))?
        } else {
            text
        }
    };
    clean_author(&raw, rules)
}

/// Normalize a raw author value: URLs and slugs become names, localized
/// prefixes are removed, implausible values are rejected.
#[must_use]
pub fn clean_author(raw: &str, rules: &CompiledRules) -> Option<String> {
    let mut value = collapse_whitespace(raw);

    if looks_like_url(&value) {
        value = name_from_slug(&url_slug(&value)?, rules)?;
    }

    value = strip_author_prefix(&value, rules);

    if is_slug_like(&value) {
        value = name_from_slug(&value, rules)?;
    }

    let value = value.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '·' | '•' | '-'));
    let len = char_len(value);
    if len < 2 || len > MAX_AUTHOR_CHARS || word_count(value) > 8 || !value.chars().any(char::is_alphabetic) {
        return None;
    }
    Some(value.to_string())
}

/// Remove a leading "By", "von", "автор:" and similar.
#[must_use]
pub fn strip_author_prefix(value: &str, rules: &CompiledRules) -> String {
    let mut prefixes: Vec<&String> = rules.tables().author_prefixes.iter().collect();
    prefixes.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));

    let trimmed = value.trim();
    let lowered = trimmed.to_lowercase();
    for prefix in prefixes {
        let prefix = prefix.to_lowercase();
        if !lowered.starts_with(&prefix) {
            continue;
        }
        let Some(rest) = trimmed.get(prefix.len()..) else {
            continue;
        };
        let separated = prefix.ends_with(':')
            || rest.starts_with(char::is_whitespace)
            || rest.starts_with(':');
        if separated {
            return rest.trim_start_matches(|c: char| c.is_whitespace() || c == ':').to_string();
        }
    }
    trimmed.to_string()
}

/// A single lowercase token joined with `-` or `_`, as in a URL path.
fn is_slug_like(value: &str) -> bool {
    !value.is_empty()
        && !value.contains(char::is_whitespace)
        && !value.chars().any(char::is_uppercase)
        && value.contains(['-', '_'])
}

/// Turn a URL slug into a display name.
///
/// `jane-doe` and `jane_doe` split on the separator, `janeDoe` splits on the
/// case change, and a single lowercase run is split before a known surname,
/// after a known given name or, failing both, at its midpoint.
///
/// ```rust
/// use rs_article_heuristics::metadata::author::name_from_slug;
/// use rs_article_heuristics::rules::DEFAULT_RULES;
///
/// assert_eq!(name_from_slug("jane-doe", &DEFAULT_RULES).as_deref(), Some("Jane Doe"));
/// assert_eq!(name_from_slug("janeDoe", &DEFAULT_RULES).as_deref(), Some("Jane Doe"));
/// assert_eq!(name_from_slug("johnsmith", &DEFAULT_RULES).as_deref(), Some("John Smith"));
/// ```
#[must_use]
pub fn name_from_slug(slug: &str, rules: &CompiledRules) -> Option<String> {
    let slug = slug.trim();

    let parts: Vec<&str> = slug
        .split(['-', '_', ' ', '.', '+'])
        .filter(|p| !p.is_empty() && !p.chars().all(|c| c.is_ascii_digit()))
        .collect();
    if parts.is_empty() {
        return None;
    }
    if parts.len() > 1 {
        return Some(parts.iter().map(|p| title_case(p)).collect::<Vec<_>>().join(" "));
    }

    let word = parts[0];
    let camel = split_camel_case(word);
    if camel.len() > 1 {
        return Some(camel.iter().map(|p| title_case(p)).collect::<Vec<_>>().join(" "));
    }

    Some(split_single_run(&word.to_lowercase(), rules))
}

fn split_camel_case(word: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in word.chars() {
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase();
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Split `johnsmith` into `John Smith`.
fn split_single_run(word: &str, rules: &CompiledRules) -> String {
    const MIN_PART: usize = 2;
    const MIN_BISECT: usize = 6;

    if let Some((first, last)) = split_before_surname(word, rules) {
        return format!("{} {}", title_case(first), title_case(last));
    }

    let mut given: Vec<&String> = rules.tables().given_names.iter().collect();
    given.sort_by_key(|g| std::cmp::Reverse(g.len()));
    for name in given {
        if let Some(rest) = word.strip_prefix(name.as_str()) {
            if rest.chars().count() >= MIN_PART {
                return format!("{} {}", title_case(name), title_case(rest));
            }
        }
    }

    let chars: Vec<char> = word.chars().collect();
    if chars.len() >= MIN_BISECT && chars.iter().all(|c| c.is_alphabetic()) {
        let mid = chars.len() / 2;
        let first: String = chars[..mid].iter().collect();
        let last: String = chars[mid..].iter().collect();
        return format!("{} {}", title_case(&first), title_case(&last));
    }
    title_case(word)
}

/// Longest trailing run that is a listed surname, leaving at least
/// three characters for the given name.
fn split_before_surname<'w>(word: &'w str, rules: &CompiledRules) -> Option<(&'w str, &'w str)> {
    const MIN_GIVEN: usize = 3;

    let surnames = &rules.tables().known_surnames;
    word.char_indices()
        .map(|(i, _)| i)
        .filter(|&i| word[..i].chars().count() >= MIN_GIVEN)
        .map(|i| word.split_at(i))
        .find(|(_, rest)| surnames.iter().any(|s| s == rest))
}

/// "By Jane Doe" inside the article, or a capitalized name linked from a
/// byline-like element.
fn byline_fallback(doc: &Document, rules: &CompiledRules) -> Option<String> {
    let article = doc.select_single("article");
    if !article.exists() {
        return None;
    }

    for node in article.select("p, span, div, address, small, li").nodes() {
        let text = dom::visible_text(node);
        if text.is_empty() || char_len(&text) > MAX_BYLINE_CHARS {
            continue;
        }
        if let Some(name) = BYLINE_NAME.captures(&text).and_then(|c| c.get(1)) {
            let name = trim_byline_trailers(name.as_str(), rules);
            if let Some(name) = clean_author(&name, rules) {
                return Some(name);
            }
        }
    }

    let linked = article.select(r#"[class*="byline"] a, [class*="author"] a, [class*="meta"] a"#);
    linked.nodes().iter().find_map(|node| {
        let text = dom::visible_text(node);
        CAPITALIZED_NAME
            .is_match(&text)
            .then(|| clean_author(&text, rules))
            .flatten()
    })
}

/// Drop trailing words like "Published" or a month name.
fn trim_byline_trailers(name: &str, rules: &CompiledRules) -> String {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    while let Some(last) = words.last() {
        let lowered = last.to_lowercase();
        if BYLINE_TRAILERS.contains(&lowered.as_str()) || rules.month_number(last).is_some() {
            words.pop();
        } else {
            break;
        }
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::rules::DEFAULT_RULES;

    fn author(html: &str) -> String {
        extract_author(&parse(html), &DEFAULT_RULES)
    }

    #[test]
    fn meta_author_wins() {
        let html = r#"<head><meta name="author" content="Jane Doe"></head><body><span class="author">Someone Else</span></body>"#;
        assert_eq!(author(html), "Jane Doe");
    }

    #[test]
    fn author_link_slug_text() {
        assert_eq!(author(r#"<a href="/author/jane-doe">jane-doe</a>"#), "Jane Doe");
    }

    #[test]
    fn author_link_without_text_uses_href() {
        assert_eq!(author(r#"<a href="https://example.com/author/jane-doe/"></a>"#), "Jane Doe");
    }

    #[test]
    fn meta_author_url_becomes_name() {
        let html = r#"<head><meta property="article:author" content="https://example.com/people/john_smith"></head>"#;
        assert_eq!(author(html), "John Smith");
    }

    #[test]
    fn localized_prefixes_are_stripped() {
        assert_eq!(author(r#"<span class="byline">By Jane Doe</span>"#), "Jane Doe");
        assert_eq!(author(r#"<span class="author">von Max Mustermann</span>"#), "Max Mustermann");
        assert_eq!(author(r#"<span class="author">Автор: Иван Петров</span>"#), "Иван Петров");
    }

    #[test]
    fn prefix_needs_a_separator() {
        assert_eq!(strip_author_prefix("Byron Lee", &DEFAULT_RULES), "Byron Lee");
        assert_eq!(strip_author_prefix("by Byron Lee", &DEFAULT_RULES), "Byron Lee");
    }

    #[test]
    fn byline_fallback_inside_article() {
        let html = "<article><h1>Headline here</h1><p>By Jane Doe Published March 3, 2024</p><p>Body text.</p></article>";
        assert_eq!(author(html), "Jane Doe");
    }

    #[test]
    fn no_author_gives_empty_string() {
        assert_eq!(author("<article><p>Nothing to see.</p></article>"), "");
    }

    #[test]
    fn slug_splitting_strategies() {
        let rules = &*DEFAULT_RULES;
        assert_eq!(name_from_slug("mary_ann-smith", rules).as_deref(), Some("Mary Ann Smith"));
        assert_eq!(name_from_slug("jdoe-42", rules).as_deref(), Some("Jdoe"));
        assert_eq!(name_from_slug("sarahconnor", rules).as_deref(), Some("Sarah Connor"));
        assert_eq!(name_from_slug("xyzqwerty", rules).as_deref(), Some("Xyzq Werty"));
        assert_eq!(name_from_slug("bob", rules).as_deref(), Some("Bob"));
        assert_eq!(name_from_slug("oliviaanderson", rules).as_deref(), Some("Olivia Anderson"));
        assert_eq!(name_from_slug("annajohnson", rules).as_deref(), Some("Anna Johnson"));
        assert_eq!(name_from_slug("thomasmann", rules).as_deref(), Some("Thomas Mann"));
        assert_eq!(name_from_slug("---", rules), None);
    }
}
