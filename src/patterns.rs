//! Fixed regex patterns and CSS selectors.
//!
//! These are structural markers (whitespace, dates, prices, names) rather
//! than site vocabulary, so they live here instead of in the extensible
//! [`crate::rules::RuleTables`]. All patterns compile once via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Runs of whitespace.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// Stray `[OBJ]` tokens left by rich-text editors.
pub static OBJ_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[obj\]").expect("OBJ_TOKEN regex"));

/// Any markup tag in sanitized HTML.
pub static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML_TAG regex"));

/// Headings made only of digits and punctuation ("1.", "#3", "(12)").
pub static NUMERIC_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\d.,:#()\-–—/]+$").expect("NUMERIC_ONLY regex"));

// =============================================================================
// Boilerplate Markers
// =============================================================================

/// A price: currency symbol next to a number, or a number with a currency code.
pub static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[$€£¥]\s?\d|\d\s?[€£$]|\b\d+(?:[.,]\d+)?\s?(?:usd|eur|gbp)\b")
        .expect("PRICE regex")
});

/// Iframe sources served by ad networks.
pub static AD_IFRAME_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)doubleclick|googlesyndication|adservice|amazon-adsystem|adnxs|taboola|outbrain|/ads?/")
        .expect("AD_IFRAME_SRC regex")
});

/// A heading ending in a "by <Name>" credit; group 1 is the title part.
pub static HEADING_BY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(.+?)\s*[|,–—-]?\s+(?i:by|von|par|por|di|da|от)\s+\p{Lu}[\p{L}'’.-]*(?:\s+\p{Lu}[\p{L}'’.-]*){0,3}\s*$",
    )
    .expect("HEADING_BY_SUFFIX regex")
});

/// Short standalone byline paragraph ("By Jane Doe").
pub static BYLINE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\W*by\b").expect("BYLINE_LINE regex"));

/// Characters used as footnote back-link glyphs and decorative arrows.
pub const ARROW_GLYPHS: &[char] = &[
    '←', '→', '↑', '↓', '↩', '↪', '⟵', '⟶', '»', '«', '›', '‹', '^', '⤴', '⤶', '▲', '▼', '►',
    '◄', '↵', '⬆', '⬅', '➔', '➜', '🔙', '\u{FE0E}', '\u{FE0F}',
];

/// Whether text is 1 to 3 arrow glyphs (variation selectors ignored).
#[must_use]
pub fn is_arrow_glyph_text(text: &str) -> bool {
    let glyphs: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\u{FE0E}' | '\u{FE0F}'))
        .collect();
    (1..=3).contains(&glyphs.len()) && glyphs.iter().all(|c| ARROW_GLYPHS.contains(c))
}

/// Footnote reference text: "1", "[2]", "(3)", "*", "†" or an arrow.
pub static FOOTNOTE_MARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[\[(]?\d{1,3}[\])]?|[*†‡§]+)\s*$").expect("FOOTNOTE_MARK regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// ISO-8601 prefix: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, optionally followed by a time.
pub static ISO_DATE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})(?:[-/.](\d{1,2})(?:[-/.](\d{1,2}))?)?(?:$|[T\s])")
        .expect("ISO_DATE_PREFIX regex")
});

/// "15 March 2024", "15th of March, 2024", "15. März 2024", "15 de marzo de 2024".
pub static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th|er|\.)?\s+(?:of\s+|de\s+)?(\p{L}{3,})\.?,?\s+(?:de\s+)?(\d{4})\b",
    )
    .expect("DAY_MONTH_YEAR regex")
});

/// "March 15, 2024", "Mar. 15th 2024".
pub static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\p{L}{3,})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b")
        .expect("MONTH_DAY_YEAR regex")
});

/// "March 2024".
pub static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\p{L}{3,})\.?\s+(\d{4})\b").expect("MONTH_YEAR regex")
});

/// Shape of a line holding nothing but a date (and maybe a weekday or time).
pub static DATE_ONLY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\W*(?:(?:published|updated|posted)(?:\s+on)?:?\s+)?(?:\p{L}+\.?,?\s+)?(?:\d{1,2}(?:st|nd|rd|th|er|\.)?\s+(?:de\s+)?\p{L}+\.?,?\s+(?:de\s+)?\d{4}|\p{L}+\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|\p{L}+\s+\d{4}|\d{4}-\d{1,2}-\d{1,2}|\d{1,2}[/.]\d{1,2}[/.]\d{2,4})(?:,?\s*(?:at\s+)?\d{1,2}:\d{2}(?:\s*[ap]\.?m\.?)?)?\W*$",
    )
    .expect("DATE_ONLY_LINE regex")
});

/// "by <Name>" inside running text; group 1 is the name.
pub static BYLINE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[\s(|•·])(?i:by|von|par|por|di|da|от)\s+(\p{Lu}[\p{L}'’.-]*(?:\s+\p{Lu}[\p{L}'’.-]*){1,3})",
    )
    .expect("BYLINE_NAME regex")
});

/// Capitalized 2 to 4 word name.
pub static CAPITALIZED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}'’.-]*(?:\s+\p{Lu}[\p{L}'’.-]*){1,3}$").expect("CAPITALIZED_NAME regex")
});

/// Personal name as it appears in headshot `alt` text ("Jane Doe", "Jane Q. Doe").
pub static PERSONAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{Ll}'’-]+(?:\s+\p{Lu}\.)?(?:\s+\p{Lu}[\p{Ll}'’-]+){1,2}$")
        .expect("PERSONAL_NAME regex")
});

// =============================================================================
// Code and Image Patterns
// =============================================================================

/// `language-rust` / `lang-js` class token; group 1 is the language.
pub static LANGUAGE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(?:language|lang)-([\w+#.-]+)").expect("LANGUAGE_CLASS regex")
});

/// Path ending in an image file extension.
pub static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:jpe?g|png|gif|webp|avif|svg|bmp|tiff?)(?:$|[?#])")
        .expect("IMAGE_EXTENSION regex")
});

// =============================================================================
// CSS Selectors
// =============================================================================

/// Author selector cascade, tried in order.
pub const AUTHOR_SELECTORS: &[&str] = &[
    r#"meta[name="author"]"#,
    r#"meta[name="citation_author"]"#,
    r#"meta[property="article:author"]"#,
    r#"meta[name="article:author"]"#,
    r#"[rel="author"]"#,
    ".author",
    ".byline",
    r#"[itemprop="author"]"#,
    r#"a[href*="/author/"]"#,
    r#"a[href*="/authors/"]"#,
    r#"a[href*="/profile/"]"#,
    r#"a[href*="/people/"]"#,
];

/// Publish-date selector cascade, tried in order.
pub const DATE_SELECTORS: &[&str] = &[
    r#"meta[property="article:published_time"]"#,
    r#"meta[name="article:published_time"]"#,
    r#"meta[itemprop="datePublished"]"#,
    r#"meta[name="date"]"#,
    r#"meta[name="pubdate"]"#,
    r#"meta[name="publish-date"]"#,
    r#"meta[name="citation_publication_date"]"#,
    r#"meta[name="dc.date"]"#,
    r#"meta[name="DC.date.issued"]"#,
    "time[datetime]",
    r#"[itemprop="datePublished"]"#,
    ".published",
    ".pubdate",
    ".post-date",
    ".entry-date",
    ".publish-date",
    ".date",
];

/// Element tags the assembler turns into content items.
pub const CONTENT_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "img", "figure", "blockquote", "pre", "code", "ul",
    "ol", "table",
];
