//! Stage 5: heading-specific vetoes.
//!
//! Looks a few siblings ahead to tell product/course adverts and link-list
//! "resources" sections from real section headings.

use super::{ExclusionReason, NodeInfo};
use crate::dom::{self, NodeRef};
use crate::patterns::PRICE;
use crate::rules::CompiledRules;

/// Siblings inspected after an advert-style heading.
const ADVERT_SIBLING_WINDOW: usize = 3;

/// A "low-text" block stays under this many characters.
const LOW_TEXT_LIMIT: usize = 600;

/// Share of a block's text that must sit inside links.
const LINK_TEXT_RATIO: f64 = 0.6;

pub fn check(info: &NodeInfo, rules: &CompiledRules) -> Option<ExclusionReason> {
    if !info.is_heading() {
        return None;
    }
    let text = info.text();
    if text.is_empty() {
        return None;
    }

    if rules.is_boilerplate_heading(text) {
        return Some(ExclusionReason::BoilerplateHeading);
    }

    if (rules.product_heading.is_match(text) || rules.training_heading.is_match(text))
        && followed_by_sales_copy(&info.node, rules)
    {
        return Some(ExclusionReason::AdvertHeading);
    }

    if rules.resource_heading.is_match(text)
        && dom::next_element_sibling(&info.node).is_some_and(|next| is_link_dense_low_text(&next))
    {
        return Some(ExclusionReason::ResourceHeading);
    }

    None
}

/// Price or guarantee phrasing within the next few element siblings.
fn followed_by_sales_copy(heading: &NodeRef, rules: &CompiledRules) -> bool {
    let mut current = dom::next_element_sibling(heading);
    let mut seen = 0;
    while let Some(sibling) = current {
        if seen >= ADVERT_SIBLING_WINDOW {
            break;
        }
        let text = dom::visible_text(&sibling);
        if PRICE.is_match(&text) || rules.guarantee.is_match(&text) {
            return true;
        }
        current = dom::next_element_sibling(&sibling);
        seen += 1;
    }
    false
}

/// Mostly links and little prose.
#[must_use]
pub fn is_link_dense_low_text(node: &NodeRef) -> bool {
    let total = dom::visible_text_len(node);
    if total == 0 || total >= LOW_TEXT_LIMIT {
        return false;
    }
    let sel = dom::selection(node);
    let links = sel.select("a");
    if links.length() < 2 {
        return false;
    }
    let link_text: usize = links
        .nodes()
        .iter()
        .map(dom::visible_text_len)
        .sum();
    link_text as f64 / total as f64 >= LINK_TEXT_RATIO
}
