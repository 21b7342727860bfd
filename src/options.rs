//! Configuration options for article extraction.
//!
//! The `Options` struct carries the caller-supplied base URL and debug flag
//! plus the tunables of the engine (ancestor-walk cap, custom rule tables).

use std::sync::Arc;

use crate::rules::{CompiledRules, DEFAULT_RULES};

/// Default cap on ancestor hops for the exclusion filter.
pub const DEFAULT_MAX_ANCESTOR_HOPS: usize = 50;

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_article_heuristics::Options;
///
/// let options = Options {
///     base_url: Some("https://example.com/news/".to_string()),
///     debug: true,
///     ..Options::default()
/// };
/// assert_eq!(options.max_ancestor_hops, 50);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Base URL for resolving relative links and images.
    ///
    /// When absent, the document's `<base href>`, canonical link or `og:url`
    /// is used in that order.
    ///
    /// Default: `None`
    pub base_url: Option<String>,

    /// Populate [`crate::DebugInfo`] on the result.
    ///
    /// Default: `false`
    pub debug: bool,

    /// Maximum ancestor hops the exclusion filter walks per node.
    ///
    /// Default: `50`
    pub max_ancestor_hops: usize,

    /// Emit `Table` items.
    ///
    /// Default: `true`
    pub include_tables: bool,

    /// Detect and insert a featured image ahead of the body.
    ///
    /// Default: `true`
    pub featured_image: bool,

    /// Detect and insert a standfirst `Subtitle` after the featured image.
    ///
    /// Default: `true`
    pub standfirst: bool,

    /// Custom rule tables. `None` uses the built-in multilingual tables.
    ///
    /// Default: `None`
    pub rules: Option<Arc<CompiledRules>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: None,
            debug: false,
            max_ancestor_hops: DEFAULT_MAX_ANCESTOR_HOPS,
            include_tables: true,
            featured_image: true,
            standfirst: true,
            rules: None,
        }
    }
}

impl Options {
    /// Options with just a base URL set.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let trimmed = base_url.trim();
        Self {
            base_url: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            ..Self::default()
        }
    }

    /// The rule tables in effect.
    #[must_use]
    pub fn rules(&self) -> Arc<CompiledRules> {
        self.rules
            .clone()
            .unwrap_or_else(|| Arc::clone(&DEFAULT_RULES))
    }
}
