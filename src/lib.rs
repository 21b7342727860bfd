//! # rs-article-heuristics
//!
//! Heuristic article extraction: title, author, publish date and an ordered
//! list of typed content items from an HTML document.
//!
//! The main container is found by scoring candidate blocks; everything
//! inside it is walked in document order and classified against layered
//! boilerplate rules (visibility, structure, class/id tokens, text patterns,
//! ancestor context). When the container yields nothing, a fallback ladder
//! widens the search.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_article_heuristics::{extract, ContentItem};
//!
//! let html = r#"<html><head><title>Storm closes bridge | Daily Post</title></head>
//! <body><nav><a href="/">Home</a></nav>
//! <article><h1>Storm closes bridge</h1>
//! <p>The river rose overnight, and the council closed the old bridge to
//! traffic until engineers could inspect the damaged piers.</p></article></body></html>"#;
//!
//! let result = extract(html);
//! assert_eq!(result.title, "Storm closes bridge");
//! assert!(matches!(result.content.first(), Some(ContentItem::Paragraph { .. })));
//! ```
//!
//! ## Pipeline
//!
//! - **Metadata**: title, author and date from meta tags, bylines and URLs
//! - **Locator**: content-container scoring
//! - **Assembler**: document-order traversal with per-tag handlers
//! - **Fallback**: lenient landmark pass, then the largest paragraph block
//! - **Dedup**: repeated headings and images, title echoes, subtitle echoes

mod extract;

/// Document tree helpers over `dom_query`.
pub mod dom;

/// Whitespace, marker and key normalization for text.
pub mod text;

/// Built-in and caller-supplied rule tables.
pub mod rules;

/// Precompiled regular expressions.
pub mod patterns;

/// URL resolution and image keys.
pub mod url_utils;

/// Image source resolution, tracking-pixel and decorative-image detection.
pub mod image;

/// Element exclusion filter.
pub mod filter;

/// Content container scoring and search.
pub mod selector;

/// Title, author, date, featured image and standfirst.
pub mod metadata;

/// Content assembly and the fallback ladder.
pub mod extractor;

/// Final deduplication pass.
pub mod dedup;

/// Character encoding detection for byte input.
pub mod encoding;

mod error;
mod options;
mod result;

pub use error::{Error, Result};
pub use extract::resolve_base_url;
pub use options::Options;
pub use result::{ContentItem, DebugInfo, ExtractionResult, FallbackTier};
pub use rules::{CompiledRules, RuleTables};

/// Extract an article with default options.
///
/// Never fails: problems are reported through [`ExtractionResult::error`].
///
/// ```rust
/// use rs_article_heuristics::extract;
///
/// let result = extract("<html><head><title>Hello</title></head><body></body></html>");
/// assert_eq!(result.title, "Hello");
/// assert!(result.content.is_empty());
/// assert!(!result.is_error());
/// ```
#[must_use]
pub fn extract(html: &str) -> ExtractionResult {
    extract_with_options(html, &Options::default())
}

/// Extract an article with custom options.
///
/// ```rust
/// use rs_article_heuristics::{extract_with_options, Options};
///
/// let html = r#"<article><h1>Lead</h1><p><img src="/a.jpg" width="800" height="600"></p></article>"#;
/// let options = Options {
///     debug: true,
///     ..Options::with_base_url("https://example.com/news/")
/// };
/// let result = extract_with_options(html, &options);
/// assert!(result.debug_info.is_some());
/// assert!(result.images().all(|i| i.image_src().is_some_and(|s| s.starts_with("https://"))));
/// ```
#[must_use]
pub fn extract_with_options(html: &str, options: &Options) -> ExtractionResult {
    extract::extract_html(html, options)
}

/// Extract from an already-parsed document.
#[must_use]
pub fn extract_document(doc: &dom::Document, options: &Options) -> ExtractionResult {
    extract::extract_document(doc, options)
}

/// Extract from raw bytes, decoding with the declared charset.
///
/// A byte-order mark wins over `<meta charset>` and
/// `<meta http-equiv="Content-Type">`; undeclared input is read as UTF-8.
/// Invalid sequences become U+FFFD.
///
/// ```rust
/// use rs_article_heuristics::{extract_bytes, Options};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9 opens</title></head><body></body></html>";
/// let result = extract_bytes(html, &Options::default());
/// assert_eq!(result.title, "Café opens");
/// ```
#[must_use]
pub fn extract_bytes(bytes: &[u8], options: &Options) -> ExtractionResult {
    let html = encoding::decode_html(bytes);
    extract_with_options(&html, options)
}
