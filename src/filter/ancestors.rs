//! Stage 6: bounded ancestor walk.
//!
//! Walks at most `max_hops` element ancestors, nearest first, stopping before
//! the located container or at `<body>`. Each ancestor is classified once per
//! filter and the verdict cached by node id, so sibling paragraphs inside the
//! same wrapper share the work.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{structural, visibility, ExclusionReason, NodeInfo};
use crate::dom::{self, NodeId, NodeRef};
use crate::rules::CompiledRules;

/// Ancestors longer than this are too large to be a single related/navigation block.
const NAVIGATION_BLOCK_MAX_TEXT: usize = 1500;

/// What one ancestor says about everything beneath it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AncestorVerdict {
    /// Ad container, iframe/aside, blacklisted class or newsletter form.
    pub reason: Option<ExclusionReason>,
    /// Inline hidden.
    pub hidden: bool,
    /// Short block opening with navigation phrasing.
    pub navigation: bool,
}

impl AncestorVerdict {
    fn classify(node: &NodeRef, rules: &CompiledRules) -> Self {
        let sel = dom::selection(node);
        let tag = dom::node_tag(node);
        let id_class = dom::id_class(&sel);

        let reason = if !id_class.is_empty() && rules.ad_container.is_match(&id_class) {
            Some(ExclusionReason::AncestorAd)
        } else if matches!(tag.as_str(), "iframe" | "aside") || structural::is_complementary(&sel) {
            Some(ExclusionReason::AncestorStructural)
        } else if !id_class.is_empty() && rules.is_excluded_class(&id_class) {
            Some(ExclusionReason::AncestorClass)
        } else if structural::is_newsletter_form(node, rules) {
            Some(ExclusionReason::AncestorNewsletter)
        } else {
            None
        };

        let navigation = reason.is_none() && {
            let text = dom::visible_text(node);
            !text.is_empty()
                && text.chars().count() < NAVIGATION_BLOCK_MAX_TEXT
                && rules.is_navigation_text(&text)
        };

        Self {
            reason,
            hidden: dom::is_hidden(&sel),
            navigation,
        }
    }
}

pub fn check(
    info: &NodeInfo,
    rules: &CompiledRules,
    container: Option<NodeId>,
    max_hops: usize,
    cache: &RefCell<HashMap<NodeId, AncestorVerdict>>,
) -> Option<ExclusionReason> {
    let text_block = info.tag == "p" || info.is_heading();
    let spare_hidden = info.is_image_like() && visibility::has_lazy_source(&info.node, rules);

    for ancestor in dom::bounded_ancestors(&info.node, container, max_hops) {
        let verdict = cached_verdict(&ancestor, rules, cache);

        if let Some(reason) = verdict.reason {
            return Some(reason);
        }
        if verdict.hidden && !spare_hidden {
            return Some(ExclusionReason::AncestorHidden);
        }
        if verdict.navigation && !text_block {
            return Some(ExclusionReason::AncestorNavigation);
        }
    }
    None
}

fn cached_verdict(
    node: &NodeRef,
    rules: &CompiledRules,
    cache: &RefCell<HashMap<NodeId, AncestorVerdict>>,
) -> AncestorVerdict {
    if let Some(verdict) = cache.borrow().get(&node.id) {
        return *verdict;
    }
    let verdict = AncestorVerdict::classify(node, rules);
    cache.borrow_mut().insert(node.id, verdict);
    verdict
}
