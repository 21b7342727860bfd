//! Container scoring.
//!
//! [`score`] applies the adjustments below in a fixed order. Later
//! multiplicative steps act on the already-adjusted value, so the order is
//! part of the behavior:
//!
//! 1. [`base_score`]: `10*paragraphs + 5*headings + min(text/100, 50)`
//! 2. [`link_density_factor`]
//! 3. [`comma_factor`]
//! 4. [`sentence_bonus`]
//! 5. [`tag_multiplier`]
//! 6. [`content_class_bonus`]
//! 7. [`short_text_factor`]
//! 8. [`list_factor`]
//! 9. [`newsletter_penalty`]
//! 10. [`image_bonus`]
//! 11. [`long_paragraph_bonus`]

use std::collections::HashMap;

use crate::dom::{self, NodeId, NodeRef};
use crate::filter::structural;
use crate::rules::CompiledRules;
use crate::text;

/// Paragraph length that earns the long-paragraph bonus.
pub const LONG_PARAGRAPH_CHARS: usize = 200;

/// Penalty applied to newsletter and marketing-cloud blocks.
pub const NEWSLETTER_PENALTY: f64 = 1000.0;

/// Facts about one candidate container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreContext {
    pub tag: String,
    pub paragraphs: usize,
    pub headings: usize,
    pub text_len: usize,
    pub links: usize,
    pub list_items: usize,
    pub commas: usize,
    pub sentences: usize,
    pub images: usize,
    pub long_paragraphs: usize,
    pub content_class: bool,
    pub newsletter: bool,
}

impl ScoreContext {
    /// Measure a candidate container.
    #[must_use]
    pub fn from_node(node: &NodeRef, rules: &CompiledRules) -> Self {
        let sel = dom::selection(node);
        let visible = dom::visible_text(node);
        let text_len = text::char_len(&visible);
        let id_class = dom::id_class(&sel);

        let paragraphs = sel.select("p");
        let long_paragraphs = paragraphs
            .nodes()
            .iter()
            .filter(|p| dom::visible_text_len(p) > LONG_PARAGRAPH_CHARS)
            .count();

        Self {
            tag: dom::node_tag(node),
            paragraphs: paragraphs.length(),
            headings: dom::count(&sel, "h1, h2, h3, h4, h5, h6"),
            text_len,
            links: dom::count(&sel, "a"),
            list_items: dom::count(&sel, "li"),
            commas: text::count_commas(&visible),
            sentences: text::count_sentences(&visible),
            images: dom::count(&sel, "img"),
            long_paragraphs,
            content_class: !id_class.is_empty() && rules.is_content_class(&id_class),
            newsletter: is_newsletter_block(node, &id_class, text_len, rules),
        }
    }

    /// [`Self::from_node`], reusing the counts of an already measured child
    /// when that child is the node's only content. Nested single-child
    /// wrappers then cost one step each instead of a full subtree walk.
    pub(crate) fn from_node_cached(node: &NodeRef, rules: &CompiledRules, cache: &mut MeasureCache) -> Self {
        let inherited = sole_element_child(node)
            .and_then(|child| cache.entries.get(&child.id).map(|entry| (child, entry.clone())));

        let (context, email_inputs) = match inherited {
            Some((child, (inner, email_inputs))) => {
                let email_inputs = email_inputs + usize::from(child.is(structural::EMAIL_INPUT_SELECTOR));
                (Self::wrapping(node, &child, inner, email_inputs, rules), email_inputs)
            }
            None => {
                let sel = dom::selection(node);
                (Self::from_node(node, rules), dom::count(&sel, structural::EMAIL_INPUT_SELECTOR))
            }
        };
        cache.entries.insert(node.id, (context.clone(), email_inputs));
        context
    }

    /// Counts for `node` from those of its sole child `inner`. The visible
    /// text is identical, so only the child itself and the node's own
    /// attributes add anything.
    fn wrapping(node: &NodeRef, child: &NodeRef, mut inner: Self, email_inputs: usize, rules: &CompiledRules) -> Self {
        let child_tag = dom::node_tag(child);
        inner.paragraphs += usize::from(child_tag == "p");
        inner.headings += usize::from(dom::is_heading_tag(&child_tag));
        inner.links += usize::from(child_tag == "a");
        inner.list_items += usize::from(child_tag == "li");
        inner.images += usize::from(child_tag == "img");
        if child_tag == "p" && inner.text_len > LONG_PARAGRAPH_CHARS {
            inner.long_paragraphs += 1;
        }

        let id_class = dom::id_class(&dom::selection(node));
        inner.tag = dom::node_tag(node);
        inner.content_class = !id_class.is_empty() && rules.is_content_class(&id_class);
        inner.newsletter = if email_inputs == 0 {
            !id_class.is_empty() && rules.marketing_class.is_match(&id_class)
        } else {
            is_newsletter_block(node, &id_class, inner.text_len, rules)
        };
        inner
    }

    /// Visible text over 100 characters with at least one paragraph, or over
    /// 300 characters regardless.
    #[must_use]
    pub fn is_substantial(&self) -> bool {
        (self.text_len > 100 && self.paragraphs >= 1) || self.text_len > 300
    }
}

/// Measured contexts by node, with the email-input count of each subtree.
#[derive(Debug, Default)]
pub(crate) struct MeasureCache {
    entries: HashMap<NodeId, (ScoreContext, usize)>,
}

/// The only element child of `node`, when every other child is
/// whitespace text or a comment.
fn sole_element_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sole = None;
    for child in node.children() {
        if child.is_element() {
            if sole.is_some() {
                return None;
            }
            sole = Some(child);
        } else if child.is_text() && !child.text().trim().is_empty() {
            return None;
        }
    }
    sole
}

/// Marketing-cloud class on the container itself, or a newsletter signup form
/// making up most of its text.
fn is_newsletter_block(node: &NodeRef, id_class: &str, text_len: usize, rules: &CompiledRules) -> bool {
    if !id_class.is_empty() && rules.marketing_class.is_match(id_class) {
        return true;
    }
    let sel = dom::selection(node);
    sel.select(structural::EMAIL_INPUT_SELECTOR)
        .nodes()
        .iter()
        .any(|input| {
            let block = dom::bounded_ancestors(input, Some(node.id), 10)
                .into_iter()
                .find(|a| dom::node_tag(a) == "form")
                .or_else(|| dom::parent_element(input));
            block.is_some_and(|b| {
                structural::is_newsletter_form(&b, rules) && dom::visible_text_len(&b) * 2 > text_len
            })
        })
}

/// Score a candidate container.
#[must_use]
pub fn score(ctx: &ScoreContext) -> f64 {
    let mut score = base_score(ctx);
    score *= link_density_factor(link_density(ctx));
    score *= comma_factor(ctx.commas);
    score += sentence_bonus(ctx.sentences);
    score *= tag_multiplier(&ctx.tag, ctx.paragraphs);
    score += content_class_bonus(ctx.content_class);
    score *= short_text_factor(ctx.text_len);
    score *= list_factor(ctx.list_items, ctx.paragraphs);
    score -= newsletter_penalty(ctx.newsletter);
    score += image_bonus(ctx.images);
    score += long_paragraph_bonus(ctx.long_paragraphs);
    score
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn base_score(ctx: &ScoreContext) -> f64 {
    10.0 * ctx.paragraphs as f64 + 5.0 * ctx.headings as f64 + (ctx.text_len as f64 / 100.0).min(50.0)
}

/// Links per paragraph, or per 100 characters when there are no paragraphs.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn link_density(ctx: &ScoreContext) -> f64 {
    let links = ctx.links as f64;
    if ctx.paragraphs == 0 {
        links / (ctx.text_len as f64 / 100.0).max(1.0)
    } else {
        links / ctx.paragraphs as f64
    }
}

#[must_use]
pub fn link_density_factor(density: f64) -> f64 {
    if density > 1.0 {
        0.5
    } else if density > 0.7 {
        0.75
    } else if density > 0.5 {
        0.9
    } else {
        1.0
    }
}

#[must_use]
pub fn comma_factor(commas: usize) -> f64 {
    if commas > 10 {
        1.2
    } else if commas > 5 {
        1.1
    } else {
        1.0
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sentence_bonus(sentences: usize) -> f64 {
    if sentences > 5 {
        (sentences as f64 * 2.0).min(30.0)
    } else {
        0.0
    }
}

#[must_use]
pub fn tag_multiplier(tag: &str, paragraphs: usize) -> f64 {
    match tag {
        "article" => 2.0,
        "main" => 1.5,
        "section" if paragraphs >= 3 => 1.2,
        _ => 1.0,
    }
}

#[must_use]
pub fn content_class_bonus(content_class: bool) -> f64 {
    if content_class {
        100.0
    } else {
        0.0
    }
}

#[must_use]
pub fn short_text_factor(text_len: usize) -> f64 {
    if text_len < 100 {
        0.5
    } else if text_len < 200 {
        0.8
    } else {
        1.0
    }
}

/// List items far outnumbering paragraphs read as a link or nav list.
#[must_use]
pub fn list_factor(list_items: usize, paragraphs: usize) -> f64 {
    let paragraphs = paragraphs.max(1);
    if list_items >= 5 && list_items > paragraphs * 3 {
        0.6
    } else if list_items >= 3 && list_items > paragraphs * 2 {
        0.8
    } else {
        1.0
    }
}

#[must_use]
pub fn newsletter_penalty(newsletter: bool) -> f64 {
    if newsletter {
        NEWSLETTER_PENALTY
    } else {
        0.0
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn image_bonus(images: usize) -> f64 {
    (images as f64 * 3.0).min(20.0)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn long_paragraph_bonus(long_paragraphs: usize) -> f64 {
    5.0 * long_paragraphs as f64
}
