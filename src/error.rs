//! Error types for rs-article-heuristics.
//!
//! Errors never cross the public `extract*` boundary: they are folded into
//! [`ExtractionResult::error`](crate::ExtractionResult). They are returned
//! directly only by rule-table construction.

/// Error type for extraction and rule-table operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pattern in a rule table failed to compile.
    #[error("invalid rule pattern in `{table}`: {source}")]
    InvalidRule {
        /// Name of the table holding the bad pattern.
        table: &'static str,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A JSON rule table could not be parsed.
    #[error("invalid rule table: {0}")]
    InvalidRuleTable(#[from] serde_json::Error),

    /// An internal panic was caught at the extraction boundary.
    #[error("extraction panicked: {0}")]
    Panic(String),

    /// General extraction failure.
    #[error("Extraction failed: {0}")]
    ExtractionError(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
