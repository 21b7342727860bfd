//! Per-call assembly state.
//!
//! `AssemblyState` holds the dedup sets and the set of nodes already turned
//! into (or rejected as) items. It is created fresh for every rung of the
//! fallback ladder. `AssemblyStats` accumulates across rungs for debug output.

use std::collections::{BTreeMap, HashSet};

use crate::dom::{NodeId, NodeRef};
use crate::filter::ExclusionReason;
use crate::text::normalize_key;
use crate::url_utils::image_key;

/// Dedup sets and consumed nodes for one assembly pass.
#[derive(Debug, Default)]
pub struct AssemblyState {
    title_key: String,
    seen_headings: HashSet<String>,
    seen_images: HashSet<String>,
    consumed: HashSet<NodeId>,
}

impl AssemblyState {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title_key: normalize_key(title),
            ..Self::default()
        }
    }

    /// Whether `text` normalizes to the document title.
    #[must_use]
    pub fn is_title(&self, text: &str) -> bool {
        !self.title_key.is_empty() && normalize_key(text) == self.title_key
    }

    /// Record a heading; `false` when it was already emitted.
    pub fn insert_heading(&mut self, text: &str) -> bool {
        self.seen_headings.insert(normalize_key(text))
    }

    /// Record an image URL; `false` when its key was already emitted.
    pub fn insert_image(&mut self, src: &str) -> bool {
        self.seen_images.insert(image_key(src))
    }

    /// Mark `node` and everything below it as handled.
    pub fn consume(&mut self, node: &NodeRef) {
        self.consumed.insert(node.id);
        self.consumed.extend(node.descendants().into_iter().map(|d| d.id));
    }

    #[must_use]
    pub fn is_consumed(&self, node: &NodeRef) -> bool {
        self.consumed.contains(&node.id)
    }
}

/// Counters reported through `DebugInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub visited: usize,
    pub excluded: usize,
    pub reasons: BTreeMap<String, usize>,
}

impl AssemblyStats {
    pub fn record_exclusion(&mut self, reason: ExclusionReason) {
        self.excluded += 1;
        *self.reasons.entry(reason.as_str().to_string()).or_insert(0) += 1;
    }
}
