//! Stage 4: text-pattern vetoes for short paragraphs and headings.

use super::{ExclusionReason, NodeInfo};
use crate::rules::CompiledRules;

/// Only text shorter than this is matched against the phrase tables.
pub const SHORT_TEXT_LIMIT: usize = 200;

pub fn check(info: &NodeInfo, rules: &CompiledRules) -> Option<ExclusionReason> {
    if info.tag != "p" && !info.is_heading() {
        return None;
    }
    let text = info.text();
    if text.is_empty() || text.chars().count() >= SHORT_TEXT_LIMIT {
        return None;
    }
    classify_short_text(text, rules)
}

/// Phrase-table verdict for a short line of text.
#[must_use]
pub fn classify_short_text(text: &str, rules: &CompiledRules) -> Option<ExclusionReason> {
    if rules.is_navigation_text(text) {
        Some(ExclusionReason::NavigationText)
    } else if rules.is_course_ad(text) {
        Some(ExclusionReason::CourseAd)
    } else if rules.is_metadata_line(text) {
        Some(ExclusionReason::MetadataLine)
    } else if rules.is_solicitation_text(text) {
        Some(ExclusionReason::Solicitation)
    } else {
        None
    }
}
