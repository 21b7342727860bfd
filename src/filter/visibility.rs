//! Stage 1: inline hidden state.
//!
//! Hidden images and figures survive when they carry a lazy-load attribute,
//! since many sites hide them until a script swaps the source in.

use super::{ExclusionReason, NodeInfo};
use crate::dom::{self, NodeRef};
use crate::rules::CompiledRules;

pub fn check(info: &NodeInfo, rules: &CompiledRules) -> Option<ExclusionReason> {
    if !dom::is_hidden(&info.sel) {
        return None;
    }
    if info.is_image_like() && has_lazy_source(&info.node, rules) {
        return None;
    }
    Some(ExclusionReason::Hidden)
}

/// The node, or an `<img>`/`<source>` inside it, carries a lazy-load attribute.
#[must_use]
pub fn has_lazy_source(node: &NodeRef, rules: &CompiledRules) -> bool {
    let lazy = &rules.tables().lazy_src_attributes;
    let carries = |n: &NodeRef| {
        let sel = dom::selection(n);
        lazy.iter().any(|attr| sel.has_attr(attr))
    };

    if carries(node) {
        return true;
    }
    node.descendants()
        .into_iter()
        .filter(|d| matches!(dom::node_tag(d).as_str(), "img" | "source"))
        .any(|d| carries(&d))
}
