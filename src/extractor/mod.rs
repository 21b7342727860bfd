//! Content assembler.
//!
//! # Module Structure
//!
//! - `state`: dedup sets, consumed nodes and debug counters for one pass
//! - `sanitize`: inline/table HTML rebuilt from the read-only tree
//! - `handlers`: one content item per tag family
//! - `pipeline`: document-order traversal of a container
//! - `fallback`: the strict → lenient → largest-block ladder
//!
//! # Usage
//!
//! ```rust
//! use rs_article_heuristics::dom::parse;
//! use rs_article_heuristics::extractor::{Assembler, AssemblyState, AssemblyStats};
//! use rs_article_heuristics::filter::ExclusionFilter;
//! use rs_article_heuristics::rules::DEFAULT_RULES;
//! use rs_article_heuristics::Options;
//!
//! let doc = parse("<article><h2>Background</h2><p>The river rose.</p></article>");
//! let root = doc.select("article").nodes()[0];
//! let options = Options::default();
//! let assembler = Assembler::new(&DEFAULT_RULES, None, &options);
//! let filter = ExclusionFilter::new(&DEFAULT_RULES, 50).with_container(Some(root.id));
//! let mut state = AssemblyState::new("Flood");
//! let mut stats = AssemblyStats::default();
//! let items = assembler.assemble(&root, &filter, &mut state, &mut stats);
//! assert_eq!(items.len(), 2);
//! ```

pub mod fallback;
pub mod handlers;
pub mod pipeline;
pub mod sanitize;
pub mod state;

use url::Url;

use crate::image::ImageResolver;
use crate::options::Options;
use crate::rules::CompiledRules;

pub use fallback::{assemble_with_fallback, Assembly};
pub use sanitize::Sanitizer;
pub use state::{AssemblyState, AssemblyStats};

/// Turns content nodes into [`crate::ContentItem`]s. Holds no per-pass
/// state; that lives in [`AssemblyState`].
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'r> {
    rules: &'r CompiledRules,
    resolver: ImageResolver<'r>,
    sanitizer: Sanitizer<'r>,
    include_tables: bool,
    max_hops: usize,
}

impl<'r> Assembler<'r> {
    #[must_use]
    pub fn new(rules: &'r CompiledRules, base: Option<&'r Url>, options: &Options) -> Self {
        Self {
            rules,
            resolver: ImageResolver::new(rules, base, options.max_ancestor_hops),
            sanitizer: Sanitizer::new(rules, base),
            include_tables: options.include_tables,
            max_hops: options.max_ancestor_hops,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &'r CompiledRules {
        self.rules
    }

    #[must_use]
    pub fn resolver(&self) -> &ImageResolver<'r> {
        &self.resolver
    }

    #[must_use]
    pub fn sanitizer(&self) -> &Sanitizer<'r> {
        &self.sanitizer
    }

    #[must_use]
    pub fn max_hops(&self) -> usize {
        self.max_hops
    }
}
