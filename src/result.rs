//! Result types for extraction output.
//!
//! [`ExtractionResult`] is the single value the engine returns; it
//! serializes to the camelCase JSON contract shared with other extraction
//! modes (`publishDate`, `debugInfo`, `errorStack`, `isFeatured`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One typed block of article content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    /// Section heading, `level` in `1..=6`.
    Heading {
        level: u8,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Sanitized inline HTML (links, bold, italic, code).
    Paragraph { html: String },

    /// The standfirst/deck, inserted once right after the featured image.
    Subtitle { text: String, html: String },

    /// Image with an absolute source URL.
    Image {
        src: String,
        alt: String,
        caption: String,
        #[serde(
            default,
            rename = "isFeatured",
            skip_serializing_if = "std::ops::Not::not"
        )]
        is_featured: bool,
    },

    /// Sanitized blockquote HTML.
    Quote { html: String },

    /// Preformatted or inline code with plain text.
    Code { language: String, text: String },

    /// Flattened list items.
    List { ordered: bool, items: Vec<String> },

    /// Sanitized table HTML, kept as one opaque block.
    Table { html: String },
}

impl ContentItem {
    /// Lowercase variant name, as serialized in `type`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Heading { .. } => "heading",
            Self::Paragraph { .. } => "paragraph",
            Self::Subtitle { .. } => "subtitle",
            Self::Image { .. } => "image",
            Self::Quote { .. } => "quote",
            Self::Code { .. } => "code",
            Self::List { .. } => "list",
            Self::Table { .. } => "table",
        }
    }

    /// Image source for image items.
    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        match self {
            Self::Image { src, .. } => Some(src),
            _ => None,
        }
    }

    /// Heading text for heading items.
    #[must_use]
    pub fn heading_text(&self) -> Option<&str> {
        match self {
            Self::Heading { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Which rung of the content-discovery ladder produced the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackTier {
    /// Strict pass over the located container.
    #[default]
    None,
    /// Lenient pass inside the first `<article>`/`<main>`.
    Lenient,
    /// Largest paragraph-bearing `<div>`.
    LargestDiv,
}

/// Counters collected when [`crate::Options::debug`] is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    /// Tag of the chosen container, if any.
    pub container_tag: Option<String>,
    /// `id` of the chosen container.
    pub container_id: Option<String>,
    /// `class` of the chosen container.
    pub container_class: Option<String>,
    /// Content score of the chosen container.
    pub container_score: f64,
    /// Containers scored by the locator.
    pub candidates_scored: usize,
    /// Content nodes visited by the assembler.
    pub nodes_visited: usize,
    /// Content nodes rejected by the exclusion filter.
    pub nodes_excluded: usize,
    /// Exclusions per reason.
    pub exclusion_reasons: BTreeMap<String, usize>,
    /// Fallback rung used.
    pub fallback: FallbackTier,
    /// Items dropped by the final dedup pass.
    pub dedup_removed: usize,
    /// Wall time of the call in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of extracting an article from a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Article title.
    pub title: String,

    /// Author name, empty when unknown.
    pub author: String,

    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, empty when unknown.
    pub publish_date: String,

    /// Body in document order, featured image and subtitle first.
    pub content: Vec<ContentItem>,

    /// Debug counters, present only in debug mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,

    /// Top-level failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Debug representation of the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_stack: Option<String>,
}

impl ExtractionResult {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether extraction failed at the top level.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// All images in content order.
    pub fn images(&self) -> impl Iterator<Item = &ContentItem> {
        self.content.iter().filter(|item| matches!(item, ContentItem::Image { .. }))
    }
}
