//! Metadata extraction module.
//!
//! Title, author and publish date come from selector cascades with text
//! fallbacks; the featured image and standfirst are found separately since
//! they depend on the located container.

pub mod author;
pub mod date;
pub mod featured;
pub mod title;

use tracing::debug;

use crate::dom::Document;
use crate::rules::CompiledRules;

pub use author::{clean_author, extract_author, name_from_slug};
pub use date::{extract_publish_date, parse_date};
pub use featured::{find_featured_image, find_standfirst, FeaturedImage, Standfirst};
pub use title::{document_title, extract_title};

/// Document-level metadata. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub publish_date: String,
}

/// Extract title, author and publish date.
///
/// # Example
///
/// ```rust
/// use rs_article_heuristics::dom::parse;
/// use rs_article_heuristics::metadata::extract_metadata;
/// use rs_article_heuristics::rules::DEFAULT_RULES;
///
/// let doc = parse(r#"<article><h1>Storm closes bridge</h1>
///     <time datetime="2024-03-15">15 March</time></article>"#);
/// let meta = extract_metadata(&doc, &DEFAULT_RULES);
/// assert_eq!(meta.title, "Storm closes bridge");
/// assert_eq!(meta.publish_date, "2024-03-15");
/// ```
#[must_use]
pub fn extract_metadata(doc: &Document, rules: &CompiledRules) -> Metadata {
    let metadata = Metadata {
        title: extract_title(doc, rules),
        author: extract_author(doc, rules),
        publish_date: extract_publish_date(doc, rules),
    };
    debug!(
        title = %metadata.title,
        author = %metadata.author,
        date = %metadata.publish_date,
        "metadata resolved"
    );
    metadata
}
