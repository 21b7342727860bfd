//! Document-order traversal.
//!
//! Collects every content tag under the root (plus "About the author"
//! sections that sit outside it), runs each through the exclusion filter and
//! hands survivors to the tag handlers. Traversal is a flat pre-order list,
//! so images interleave with the text around them.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::dom::{self, NodeId, NodeRef};
use crate::filter::ExclusionFilter;
use crate::patterns::CONTENT_TAGS;
use crate::result::ContentItem;

use super::state::{AssemblyState, AssemblyStats};
use super::Assembler;

/// Parents that make a `<code>` element inline rather than a block.
const INLINE_CODE_PARENTS: &[&str] = &[
    "p", "li", "a", "span", "td", "th", "dd", "dt", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Hops checked when deciding whether `<code>` is inline.
const INLINE_CODE_HOPS: usize = 4;

/// Headings that can open an "About the author" section.
const ABOUT_HEADINGS: &str = "h2, h3, h4";

impl Assembler<'_> {
    /// Build items from everything under `root`, in document order.
    pub fn assemble(
        &self,
        root: &NodeRef,
        filter: &ExclusionFilter,
        state: &mut AssemblyState,
        stats: &mut AssemblyStats,
    ) -> Vec<ContentItem> {
        let scope = Some(root.id);
        let mut nodes = content_nodes(root);

        let extra = self.about_author_sections(root, filter);
        if !extra.is_empty() {
            debug!(sections = extra.len(), "adding about-the-author sections");
            for section in &extra {
                nodes.extend(content_nodes(section));
            }
            sort_document_order(root, &mut nodes);
        }

        let mut items = Vec::new();
        for node in nodes {
            if state.is_consumed(&node) {
                continue;
            }
            let tag = dom::node_tag(&node);
            if tag == "code" && dom::has_ancestor_tag(&node, INLINE_CODE_PARENTS, INLINE_CODE_HOPS) {
                continue;
            }

            stats.visited += 1;
            if let Some(reason) = filter.check(&node) {
                stats.record_exclusion(reason);
                state.consume(&node);
                continue;
            }
            if let Some(item) = self.handle(&node, &tag, state, scope) {
                trace!(kind = item.kind(), "item emitted");
                items.push(item);
            }
        }
        items
    }

    /// Parents of "About the author" headings outside `root` that the filter
    /// lets through.
    fn about_author_sections<'a>(&self, root: &NodeRef<'a>, filter: &ExclusionFilter) -> Vec<NodeRef<'a>> {
        let top = document_root(root);
        let mut sections: Vec<NodeRef<'a>> = Vec::new();
        for heading in dom::selection(&top).select(ABOUT_HEADINGS).nodes() {
            if dom::is_within(heading, root.id) {
                continue;
            }
            if !self.rules.about_author.is_match(&dom::visible_text(heading)) {
                continue;
            }
            let Some(section) = dom::parent_element(heading) else {
                continue;
            };
            let tag = dom::node_tag(&section);
            if matches!(tag.as_str(), "body" | "html") || dom::is_within(root, section.id) {
                continue;
            }
            if filter.is_excluded(&section) || sections.iter().any(|s| s.id == section.id) {
                continue;
            }
            sections.push(section);
        }
        sections
    }
}

/// Content-tag elements under `node`, pre-order.
fn content_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(|n| n.is_element() && CONTENT_TAGS.contains(&dom::node_tag(n).as_str()))
        .collect()
}

/// Topmost ancestor of `node`.
fn document_root<'a>(node: &NodeRef<'a>) -> NodeRef<'a> {
    let mut top = *node;
    while let Some(parent) = top.parent() {
        top = parent;
    }
    top
}

/// Reorder by position in the whole document, dropping repeats.
fn sort_document_order(root: &NodeRef, nodes: &mut Vec<NodeRef>) {
    let top = document_root(root);
    let position: HashMap<NodeId, usize> = top
        .descendants()
        .into_iter()
        .enumerate()
        .map(|(i, n)| (n.id, i))
        .collect();
    nodes.sort_by_key(|n| position.get(&n.id).copied().unwrap_or(usize::MAX));
    nodes.dedup_by_key(|n| n.id);
}
