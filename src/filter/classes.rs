//! Stage 3: class/id blacklist.
//!
//! Images use whole-token equality so `lead-article-image` is not read as
//! an ad; everything else uses the `-`/`_`/space word-boundary match.

use super::{ExclusionReason, NodeInfo};
use crate::rules::CompiledRules;

pub fn check(info: &NodeInfo, rules: &CompiledRules) -> Option<ExclusionReason> {
    if info.id_class.is_empty() {
        return None;
    }
    let excluded = if info.is_image_like() {
        rules.is_excluded_class_strict(&info.id_class)
    } else {
        rules.is_excluded_class(&info.id_class)
    };
    excluded.then_some(ExclusionReason::ExcludedClass)
}
