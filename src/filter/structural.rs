//! Stage 2: structural vetoes.
//!
//! Iframes, footnote back-links, decorative icons, asides and newsletter
//! signup forms are excluded on shape alone.

use super::{ExclusionReason, NodeInfo};
use crate::dom::{self, NodeRef, Selection};
use crate::patterns::{is_arrow_glyph_text, AD_IFRAME_SRC};
use crate::rules::CompiledRules;

/// A node holding an email input is a signup form only while it stays small.
const NEWSLETTER_FORM_MAX_TEXT: usize = 600;

/// Longest text an icon wrapper may carry.
const ICON_MAX_TEXT: usize = 3;

/// Email inputs, matched without relying on case-insensitive attribute flags.
pub const EMAIL_INPUT_SELECTOR: &str =
    r#"input[type="email"], input[type="EMAIL"], input[name*="email"]"#;

pub fn check(info: &NodeInfo, rules: &CompiledRules) -> Option<ExclusionReason> {
    match info.tag.as_str() {
        "iframe" => return Some(iframe_reason(info, rules)),
        "svg" => return Some(ExclusionReason::DecorativeIcon),
        "aside" => return Some(ExclusionReason::Aside),
        _ => {}
    }

    if is_complementary(&info.sel) {
        return Some(ExclusionReason::Aside);
    }

    if info.tag == "a" && is_footnote_backlink(&info.sel) {
        return Some(ExclusionReason::FootnoteBacklink);
    }

    if is_decorative_icon(info, rules) {
        return Some(ExclusionReason::DecorativeIcon);
    }

    if is_newsletter_form(&info.node, rules) {
        return Some(ExclusionReason::NewsletterForm);
    }

    None
}

fn iframe_reason(info: &NodeInfo, rules: &CompiledRules) -> ExclusionReason {
    let src = dom::get_attribute(&info.sel, "src").unwrap_or_default();
    let parent_is_ad = dom::parent_element(&info.node)
        .is_some_and(|p| rules.ad_container.is_match(&dom::id_class(&dom::selection(&p))));
    if AD_IFRAME_SRC.is_match(&src) || parent_is_ad {
        ExclusionReason::AdIframe
    } else {
        ExclusionReason::Iframe
    }
}

/// `role="complementary"`.
#[must_use]
pub fn is_complementary(sel: &Selection) -> bool {
    sel.attr("role")
        .is_some_and(|role| role.trim().eq_ignore_ascii_case("complementary"))
}

/// An in-page link back from a footnote: `href="#..."` with short text, an
/// arrow glyph or a "return" emoji, or a back-reference class.
#[must_use]
pub fn is_footnote_backlink(sel: &Selection) -> bool {
    let Some(href) = sel.attr("href") else {
        return false;
    };
    if !href.trim().starts_with('#') {
        return false;
    }

    let class = sel.attr("class").map(|c| c.to_ascii_lowercase()).unwrap_or_default();
    if ["backref", "footnote-back", "reversefootnote", "footnote-return", "fn-back"]
        .iter()
        .any(|token| class.contains(token))
    {
        return true;
    }

    let text = dom::normalized_text(sel);
    text.is_empty()
        || is_arrow_glyph_text(&text)
        || text.contains('↩')
        || text.contains('🔙')
        || (text.chars().count() <= 3 && !text.chars().any(char::is_alphanumeric))
}

/// A footnote reference or back-link: in-page `href` with very short text.
#[must_use]
pub fn is_footnote_link(sel: &Selection) -> bool {
    let Some(href) = sel.attr("href") else {
        return false;
    };
    if !href.trim().starts_with('#') {
        return false;
    }
    let text = dom::normalized_text(sel);
    is_footnote_backlink(sel) || crate::patterns::FOOTNOTE_MARK.is_match(&text)
}

/// Icon-font wrappers and bare arrow glyphs.
#[must_use]
pub fn is_decorative_icon(info: &NodeInfo, rules: &CompiledRules) -> bool {
    let inline_like = matches!(
        info.tag.as_str(),
        "i" | "span" | "a" | "button" | "em" | "b" | "use" | "div" | "p" | "li"
    );
    if !inline_like {
        return false;
    }

    let text = info.text();
    if is_arrow_glyph_text(text) {
        return true;
    }

    matches!(info.tag.as_str(), "i" | "span" | "a" | "button" | "use")
        && rules.icon_class.is_match(&info.id_class)
        && text.chars().count() <= ICON_MAX_TEXT
}

/// A small block holding an `<input type=email>` plus newsletter phrasing
/// or a marketing-cloud class.
#[must_use]
pub fn is_newsletter_form(node: &NodeRef, rules: &CompiledRules) -> bool {
    let sel = dom::selection(node);
    if !has_email_input(&sel) {
        return false;
    }
    let text = dom::visible_text(node);
    if text.chars().count() > NEWSLETTER_FORM_MAX_TEXT {
        return false;
    }
    if rules.newsletter.is_match(&text) || rules.marketing_class.is_match(&dom::id_class(&sel)) {
        return true;
    }
    sel.select("form, input, button").nodes().iter().any(|n| {
        let s = dom::selection(n);
        rules.marketing_class.is_match(&dom::id_class(&s))
            || s.attr("placeholder")
                .is_some_and(|p| rules.newsletter.is_match(&p))
            || s.attr("value").is_some_and(|v| rules.newsletter.is_match(&v))
    })
}

/// Whether the selection contains (or is) an email input.
#[must_use]
pub fn has_email_input(sel: &Selection) -> bool {
    let is_email_input = |s: &Selection| {
        dom::tag_name(s).as_deref() == Some("input")
            && s.attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("email"))
    };
    is_email_input(sel) || sel.select(EMAIL_INPUT_SELECTOR).exists()
}
