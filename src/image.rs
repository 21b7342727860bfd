//! Image resolution.
//!
//! Picks the real source of an `<img>` out of `src`, `srcset`, `<picture>`
//! sources, lazy-load attributes and enclosing links, and classifies images
//! as placeholders, tracking pixels or decorative (logos, headshots,
//! avatars) so the assembler can skip them.

use url::Url;

use crate::dom::{self, NodeRef, Selection};
use crate::patterns::PERSONAL_NAME;
use crate::rules::CompiledRules;
use crate::text::collapse_whitespace;
use crate::url_utils::{is_image_url, resolve_url};

/// Inline `data:image` URLs at or below this length are placeholders.
const PLACEHOLDER_DATA_URI_LEN: usize = 100;

/// Largest side of a "small square" headshot, in pixels.
const HEADSHOT_MAX_SIDE: u32 = 250;

/// Largest side of a facepile avatar, in pixels.
const AVATAR_MAX_SIDE: u32 = 120;

/// One `srcset` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SrcsetCandidate {
    pub url: String,
    /// Width descriptor (`800w`).
    pub width: Option<u32>,
    /// Density descriptor (`2x`); `1.0` when no descriptor is given.
    pub density: f64,
}

/// Parse a `srcset` value into candidates. Malformed entries are skipped.
///
/// ```rust
/// use rs_article_heuristics::image::parse_srcset;
///
/// let candidates = parse_srcset("small.jpg 400w, large.jpg 1200w");
/// assert_eq!(candidates.len(), 2);
/// assert_eq!(candidates[1].width, Some(1200));
/// ```
#[must_use]
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetCandidate> {
    let mut out = Vec::new();

    for part in srcset.split(',') {
        let mut tokens = part.split_whitespace();
        let Some(url) = tokens.next() else {
            continue;
        };
        if url.is_empty() {
            continue;
        }

        let mut candidate = SrcsetCandidate {
            url: url.to_string(),
            width: None,
            density: 1.0,
        };
        if let Some(descriptor) = tokens.next() {
            let descriptor = descriptor.to_ascii_lowercase();
            if let Some(w) = descriptor.strip_suffix('w') {
                candidate.width = w.parse().ok();
            } else if let Some(x) = descriptor.strip_suffix('x') {
                candidate.density = x.parse().unwrap_or(1.0);
            }
        }
        out.push(candidate);
    }

    out
}

/// Highest-resolution URL in a `srcset`: largest width descriptor, or
/// largest density when no widths are given.
#[must_use]
pub fn best_srcset_candidate(srcset: &str) -> Option<String> {
    let candidates = parse_srcset(srcset);

    let by_width = candidates
        .iter()
        .filter_map(|c| c.width.map(|w| (w, c)))
        .max_by_key(|(w, _)| *w)
        .map(|(_, c)| c.url.clone());
    if by_width.is_some() {
        return by_width;
    }

    candidates
        .iter()
        .max_by(|a, b| a.density.total_cmp(&b.density))
        .map(|c| c.url.clone())
}

/// Resolves and classifies images against one set of rules and base URL.
#[derive(Debug, Clone, Copy)]
pub struct ImageResolver<'r> {
    rules: &'r CompiledRules,
    base: Option<&'r Url>,
    max_hops: usize,
}

impl<'r> ImageResolver<'r> {
    #[must_use]
    pub fn new(rules: &'r CompiledRules, base: Option<&'r Url>, max_hops: usize) -> Self {
        Self {
            rules,
            base,
            max_hops,
        }
    }

    /// Best raw source candidate, before resolution against the base URL.
    #[must_use]
    pub fn source_candidate(&self, img: &NodeRef) -> Option<String> {
        self.source_candidates(img).into_iter().next()
    }

    /// Best source, made absolute. Candidates that cannot be made absolute
    /// are skipped in favour of the next one in priority order.
    #[must_use]
    pub fn resolve(&self, img: &NodeRef) -> Option<String> {
        self.source_candidates(img)
            .into_iter()
            .find_map(|candidate| resolve_url(&candidate, self.base))
    }

    /// Resolve a bare URL taken from metadata (`og:image` and friends), with
    /// placeholder, tracking and logo URLs rejected.
    #[must_use]
    pub fn resolve_raw(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || self.is_placeholder(raw) {
            return None;
        }
        let url = resolve_url(raw, self.base)?;
        if self.rules.tracking_url.is_match(&url) || self.rules.logo_token.is_match(&url_tokens(&url)) {
            return None;
        }
        Some(url)
    }

    /// All usable candidates in priority order, placeholders removed.
    fn source_candidates(&self, img: &NodeRef) -> Vec<String> {
        let sel = dom::selection(img);
        let mut out: Vec<String> = Vec::new();
        let push = |candidate: Option<String>, out: &mut Vec<String>| {
            if let Some(c) = candidate {
                let c = c.trim().to_string();
                if !c.is_empty() && !self.is_placeholder(&c) && !out.contains(&c) {
                    out.push(c);
                }
            }
        };

        push(dom::non_empty_attribute(&sel, "src"), &mut out);
        push(
            dom::non_empty_attribute(&sel, "srcset").and_then(|s| best_srcset_candidate(&s)),
            &mut out,
        );
        push(self.picture_source(img), &mut out);

        for attr in &self.rules.tables().lazy_src_attributes {
            let Some(value) = dom::non_empty_attribute(&sel, attr) else {
                continue;
            };
            let candidate = if attr.ends_with("srcset") {
                best_srcset_candidate(&value)
            } else {
                Some(value)
            };
            push(candidate, &mut out);
        }

        push(self.enclosing_image_link(img), &mut out);
        out
    }

    /// Best candidate across an enclosing `<picture>`'s `<source>` elements.
    fn picture_source(&self, img: &NodeRef) -> Option<String> {
        let parent = dom::parent_element(img)?;
        if dom::node_tag(&parent) != "picture" {
            return None;
        }

        let mut best: Option<(u32, f64, String)> = None;
        for source in dom::element_children(&parent) {
            if dom::node_tag(&source) != "source" {
                continue;
            }
            let sel = dom::selection(&source);
            let Some(srcset) = dom::non_empty_attribute(&sel, "srcset")
                .or_else(|| dom::non_empty_attribute(&sel, "data-srcset"))
            else {
                continue;
            };
            for candidate in parse_srcset(&srcset) {
                if self.is_placeholder(&candidate.url) {
                    continue;
                }
                let rank = (candidate.width.unwrap_or(0), candidate.density);
                let better = best
                    .as_ref()
                    .is_none_or(|(w, d, _)| rank.0 > *w || (rank.0 == *w && rank.1 > *d));
                if better {
                    best = Some((rank.0, rank.1, candidate.url));
                }
            }
        }
        best.map(|(_, _, url)| url)
    }

    /// `href` of a nearby enclosing `<a>` when it points at an image file.
    fn enclosing_image_link(&self, img: &NodeRef) -> Option<String> {
        dom::bounded_ancestors(img, None, self.max_hops.min(3))
            .into_iter()
            .find(|a| dom::node_tag(a) == "a")
            .and_then(|a| dom::non_empty_attribute(&dom::selection(&a), "href"))
            .filter(|href| is_image_url(href))
    }

    /// Tiny inline data URIs and URLs carrying placeholder tokens.
    #[must_use]
    pub fn is_placeholder(&self, url: &str) -> bool {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("data:") {
            return !lower.starts_with("data:image") || lower.len() <= PLACEHOLDER_DATA_URI_LEN;
        }
        self.rules
            .tables()
            .placeholder_tokens
            .iter()
            .any(|token| lower.contains(token.as_str()))
    }

    /// Near-zero-size or analytics-hosted images.
    #[must_use]
    pub fn is_tracking_pixel(&self, img: &NodeRef, url: &str) -> bool {
        if self.rules.tracking_url.is_match(url) {
            return true;
        }

        let sel = dom::selection(img);
        let attr_w = dom::attribute_dimension(&sel, "width");
        let attr_h = dom::attribute_dimension(&sel, "height");
        if let (Some(w), Some(h)) = (attr_w, attr_h) {
            if w <= 3 && h <= 3 {
                return true;
            }
        }

        let css_w = dom::style_dimension(&sel, "width");
        let css_h = dom::style_dimension(&sel, "height");
        if attr_w.is_none() && attr_h.is_none() {
            if let (Some(w), Some(h)) = (css_w, css_h) {
                if w <= 1 && h <= 1 {
                    return true;
                }
            }
        }

        let tiny = [attr_w, attr_h, css_w, css_h]
            .into_iter()
            .flatten()
            .any(|d| d <= 3);
        tiny && dom::is_hidden(&sel)
    }

    /// Logos, social icons, author headshots and avatars.
    #[must_use]
    pub fn is_decorative(&self, img: &NodeRef, url: &str) -> bool {
        let sel = dom::selection(img);
        let id_class = dom::id_class(&sel);
        let alt = dom::get_attribute(&sel, "alt")
            .map(|a| collapse_whitespace(&a))
            .unwrap_or_default();

        if self.rules.headshot_class.is_match(&id_class) {
            return true;
        }
        if let Some(parent) = dom::parent_element(img) {
            if self
                .rules
                .headshot_class
                .is_match(&dom::id_class(&dom::selection(&parent)))
            {
                return true;
            }
        }

        if self.rules.logo_token.is_match(&id_class) || self.rules.logo_token.is_match(&url_tokens(url)) {
            return true;
        }
        if !alt.is_empty() && alt.split_whitespace().count() <= 3 && self.rules.logo_token.is_match(&alt) {
            return true;
        }

        let (width, height) = dimensions(&sel);
        let ancestors = dom::bounded_ancestors(img, None, self.max_hops);
        let in_author_context = ancestors
            .iter()
            .any(|a| self.rules.author_context.is_match(&dom::id_class(&dom::selection(a))));

        if in_author_context {
            if let (Some(w), Some(h)) = (width, height) {
                if is_small_square(w, h) {
                    return true;
                }
            }
            if PERSONAL_NAME.is_match(&alt) {
                return true;
            }
        }

        let in_facepile = ancestors
            .iter()
            .any(|a| self.rules.facepile_context.is_match(&dom::id_class(&dom::selection(a))));
        if in_facepile {
            let small = [width, height].into_iter().flatten().any(|d| d <= AVATAR_MAX_SIDE);
            if small {
                return true;
            }
        }

        false
    }

    /// Caption for an image: `<figcaption>`, then a caption/credit element,
    /// then the figure's own text with the `alt` text removed.
    #[must_use]
    pub fn caption(&self, figure: Option<&NodeRef>, img: &NodeRef, alt: &str) -> String {
        if let Some(figure) = figure {
            let fig = dom::selection(figure);
            let figcaption = fig.select("figcaption");
            if figcaption.exists() {
                let text = dom::normalized_text(&figcaption);
                if !text.is_empty() {
                    return text;
                }
            }

            let credit = fig.select(r#"[class*="caption"], [class*="credit"]"#);
            if credit.exists() {
                let text = dom::normalized_text(&credit);
                if !text.is_empty() {
                    return text;
                }
            }

            let full = dom::visible_text(figure);
            let remainder = if alt.is_empty() {
                full
            } else {
                collapse_whitespace(&full.replacen(alt, "", 1))
            };
            if !remainder.is_empty() && remainder.chars().count() <= 300 {
                return remainder;
            }
            return String::new();
        }

        dom::next_element_sibling(img)
            .filter(|sibling| {
                let sel = dom::selection(sibling);
                let class = dom::get_attribute(&sel, "class").unwrap_or_default().to_lowercase();
                class.contains("caption") || class.contains("credit")
            })
            .map(|sibling| dom::visible_text(&sibling))
            .unwrap_or_default()
    }
}

/// Width and height from attributes, falling back to inline CSS.
fn dimensions(sel: &Selection) -> (Option<u32>, Option<u32>) {
    let width = dom::attribute_dimension(sel, "width").or_else(|| dom::style_dimension(sel, "width"));
    let height = dom::attribute_dimension(sel, "height").or_else(|| dom::style_dimension(sel, "height"));
    (width, height)
}

fn is_small_square(width: u32, height: u32) -> bool {
    if width == 0 || height == 0 || width > HEADSHOT_MAX_SIDE || height > HEADSHOT_MAX_SIDE {
        return false;
    }
    let ratio = f64::from(width) / f64::from(height);
    (0.8..=1.25).contains(&ratio)
}

/// Path of a URL split into space separated tokens, so `/img/site-logo.png`
/// becomes `img site-logo png` for token matching. The host is ignored.
fn url_tokens(url: &str) -> String {
    let path = Url::parse(url).map_or_else(|_| url.to_string(), |u| u.path().to_string());
    path.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { ' ' })
        .collect()
}
