//! Content locator.
//!
//! Picks the container most likely to hold the article body: the first
//! `<article>`, then the first `<main>`, each accepted only when its score is
//! positive and its content substantial. Failing both, every `div`,
//! `section`, `article` and `main` that the exclusion filter lets through is
//! scored and the best substantial one wins.

pub mod scoring;

use tracing::{debug, trace};

use crate::dom::{self, Document, NodeRef};
use crate::filter::ExclusionFilter;

pub use scoring::{score, ScoreContext};

use scoring::MeasureCache;

/// Tags scored when neither `<article>` nor `<main>` qualifies.
const CANDIDATE_SELECTOR: &str = "div, section, article, main";

/// The chosen container and how it was found.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub node: NodeRef<'a>,
    pub score: f64,
    pub context: ScoreContext,
    /// Containers scored to reach the decision.
    pub candidates_scored: usize,
}

/// Find the main content container, or `None` when nothing qualifies.
#[must_use]
pub fn locate_container<'a>(doc: &'a Document, filter: &ExclusionFilter) -> Option<Located<'a>> {
    let mut scored = 0;

    for tag in ["article", "main"] {
        let Some(node) = doc.select_single(tag).nodes().first().copied() else {
            continue;
        };
        let context = ScoreContext::from_node(&node, filter.rules());
        let value = score(&context);
        scored += 1;
        if value > 0.0 && context.is_substantial() {
            debug!(tag, score = value, "container from landmark element");
            return Some(Located { node, score: value, context, candidates_scored: scored });
        }
        trace!(tag, score = value, substantial = context.is_substantial(), "landmark rejected");
    }

    // Measured innermost first so wrappers can reuse their child's counts.
    let candidates = doc.select(CANDIDATE_SELECTOR);
    let mut cache = MeasureCache::default();
    let mut measured: Vec<(NodeRef<'a>, ScoreContext)> = candidates
        .nodes()
        .iter()
        .rev()
        .filter(|node| !filter.is_excluded(node))
        .map(|node| (*node, ScoreContext::from_node_cached(node, filter.rules(), &mut cache)))
        .collect();
    measured.reverse();

    let mut best: Option<Located<'a>> = None;
    for (node, context) in measured {
        scored += 1;
        if !context.is_substantial() {
            continue;
        }
        let value = score(&context);
        if value <= 0.0 {
            continue;
        }
        if best.as_ref().is_none_or(|b| value > b.score) {
            best = Some(Located { node, score: value, context, candidates_scored: 0 });
        }
    }

    match best {
        Some(mut located) => {
            located.candidates_scored = scored;
            debug!(
                tag = %located.context.tag,
                score = located.score,
                candidates = scored,
                "container from scan"
            );
            Some(located)
        }
        None => {
            debug!(candidates = scored, "no container found");
            None
        }
    }
}

/// Score a single node, for diagnostics and tests.
#[must_use]
pub fn score_node(node: &NodeRef, filter: &ExclusionFilter) -> f64 {
    score(&ScoreContext::from_node(node, filter.rules()))
}

/// `tag#id.class` label for debug output.
#[must_use]
pub fn describe(node: &NodeRef) -> (String, Option<String>, Option<String>) {
    let sel = dom::selection(node);
    (
        dom::node_tag(node),
        dom::non_empty_attribute(&sel, "id"),
        dom::non_empty_attribute(&sel, "class"),
    )
}
