//! Content-discovery ladder.
//!
//! 1. Strict pass over the located container, or over the first `<article>`
//!    or `<main>` when the standfirst was found there. A root holding the
//!    standfirst counts as productive even when nothing else survives.
//! 2. Lenient pass (visibility and structural vetoes only) inside the first
//!    `<article>` or `<main>`.
//! 3. The `<div>` holding the most paragraphs with more than 500 characters
//!    of text, or `<body>` when no such div exists: strict first, lenient if
//!    that yields nothing.
//!
//! Each rung starts from fresh dedup sets; counters accumulate.

use std::collections::HashMap;

use tracing::debug;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::filter::ExclusionFilter;
use crate::result::{ContentItem, FallbackTier};

use super::state::{AssemblyState, AssemblyStats};
use super::Assembler;

/// Text a div needs before it can be the last-resort container.
const LARGEST_DIV_MIN_CHARS: usize = 500;

/// Items produced by the ladder and where they came from.
#[derive(Debug, Default)]
pub struct Assembly<'a> {
    pub items: Vec<ContentItem>,
    pub tier: FallbackTier,
    pub root: Option<NodeRef<'a>>,
    pub stats: AssemblyStats,
}

/// Run the ladder.
///
/// `title` seeds the heading filter; `skip` (the standfirst element) is
/// never emitted as body content.
#[must_use]
pub fn assemble_with_fallback<'a>(
    doc: &'a Document,
    located: Option<&NodeRef<'a>>,
    assembler: &Assembler,
    title: &str,
    skip: Option<&NodeRef>,
) -> Assembly<'a> {
    let rules = assembler.rules();
    let max_hops = assembler.max_hops();
    let mut stats = AssemblyStats::default();

    let run = |root: &NodeRef<'a>, lenient: bool, stats: &mut AssemblyStats| {
        let mut filter = ExclusionFilter::new(rules, max_hops).with_container(Some(root.id));
        if lenient {
            filter = filter.lenient();
        }
        let mut state = AssemblyState::new(title);
        if let Some(skip) = skip {
            state.consume(skip);
        }
        assembler.assemble(root, &filter, &mut state, stats)
    };

    let strict_root = located.copied().or_else(|| {
        skip.and_then(|skip| first_landmark(doc).filter(|landmark| dom::is_within(skip, landmark.id)))
    });
    if let Some(container) = strict_root {
        let items = run(&container, false, &mut stats);
        let holds_standfirst = skip.is_some_and(|skip| dom::is_within(skip, container.id));
        if !items.is_empty() || holds_standfirst {
            return Assembly { items, tier: FallbackTier::None, root: Some(container), stats };
        }
        debug!("strict pass produced no items");
    }

    if let Some(landmark) = first_landmark(doc) {
        let items = run(&landmark, true, &mut stats);
        if !items.is_empty() {
            debug!(items = items.len(), "lenient landmark pass");
            return Assembly { items, tier: FallbackTier::Lenient, root: Some(landmark), stats };
        }
    }

    let block = largest_paragraph_div(doc, max_hops).or_else(|| doc.select_single("body").nodes().first().copied());
    if let Some(block) = block {
        let mut items = run(&block, false, &mut stats);
        if items.is_empty() {
            items = run(&block, true, &mut stats);
        }
        if !items.is_empty() {
            debug!(items = items.len(), tag = %dom::node_tag(&block), "largest block pass");
            return Assembly { items, tier: FallbackTier::LargestDiv, root: Some(block), stats };
        }
    }

    debug!("no content found on any rung");
    Assembly { stats, ..Assembly::default() }
}

/// First `<article>`, else first `<main>`.
#[must_use]
pub fn first_landmark(doc: &Document) -> Option<NodeRef<'_>> {
    ["article", "main"]
        .iter()
        .find_map(|tag| doc.select_single(tag).nodes().first().copied())
}

/// The `<div>` with the most `<p>` descendants among those with more than
/// 500 characters of text. Paragraphs are credited to their div ancestors
/// within `max_hops`.
#[must_use]
pub fn largest_paragraph_div(doc: &Document, max_hops: usize) -> Option<NodeRef<'_>> {
    let mut counts: HashMap<NodeId, usize> = HashMap::new();
    for p in doc.select("p").nodes() {
        for ancestor in dom::bounded_ancestors(p, None, max_hops) {
            if dom::node_tag(&ancestor) == "div" {
                *counts.entry(ancestor.id).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(usize, NodeRef<'_>)> = doc
        .select("div")
        .nodes()
        .iter()
        .filter_map(|div| counts.get(&div.id).map(|count| (*count, *div)))
        .collect();
    // Stable sort: ties go to the outermost div, which comes first.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
        .into_iter()
        .map(|(_, node)| node)
        .find(|node| dom::visible_text_len(node) > LARGEST_DIV_MIN_CHARS)
}
