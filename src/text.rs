//! Text normalization and counting helpers shared by scoring, filtering and
//! deduplication.

use crate::patterns::{HTML_TAG, OBJ_TOKEN, WHITESPACE};

/// Object replacement character left behind by some editors.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Collapse runs of whitespace into single spaces and trim.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE.replace_all(input.trim(), " ").into_owned()
}

/// Remove object-replacement markers and stray `[OBJ]` tokens.
#[must_use]
pub fn strip_markers(input: &str) -> String {
    let without_char: String = input.chars().filter(|c| *c != OBJECT_REPLACEMENT).collect();
    collapse_whitespace(&OBJ_TOKEN.replace_all(&without_char, " "))
}

/// Dedup key for text: markers stripped, lowercased, whitespace collapsed.
///
/// ```rust
/// use rs_article_heuristics::text::normalize_key;
///
/// assert_eq!(normalize_key("  My \u{FFFC}Title [OBJ] "), "my title");
/// ```
#[must_use]
pub fn normalize_key(input: &str) -> String {
    strip_markers(input).to_lowercase()
}

/// Plain text of sanitized HTML: tags become spaces, the entities the
/// sanitizer emits are decoded.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, " ");
    let decoded = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    collapse_whitespace(&decoded)
}

/// Character (not byte) length.
#[inline]
#[must_use]
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

/// Number of commas, counting full-width and ideographic commas.
#[must_use]
pub fn count_commas(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, ',' | '，' | '、')).count()
}

/// Sentence terminator runs (`.`, `!`, `?` and their full-width forms).
/// An ellipsis counts once.
#[must_use]
pub fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut prev_term = false;

    for ch in text.chars() {
        let is_term = matches!(ch, '.' | '!' | '?' | '。' | '！' | '？');
        if is_term && !prev_term {
            count += 1;
        }
        prev_term = is_term;
    }

    count
}

/// Whitespace separated tokens.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Uppercase the first character, lowercase the rest.
#[must_use]
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_trims_and_joins() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }

    #[test]
    fn normalize_key_strips_markers() {
        assert_eq!(normalize_key("My Title"), normalize_key("  my  title\u{FFFC}"));
        assert_eq!(normalize_key("[OBJ] Heading"), "heading");
    }

    #[test]
    fn sentence_runs_count_once() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("Wait... what?!"), 2);
        assert_eq!(count_sentences("no terminator"), 0);
    }

    #[test]
    fn commas_include_cjk() {
        assert_eq!(count_commas("a, b，c、d"), 3);
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("jANE"), "Jane");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn html_to_text_decodes_entities() {
        assert_eq!(html_to_text(r#"Fish &amp; <a href="/x">chips</a> &lt;3"#), "Fish & chips <3");
    }
}
