//! Featured image and standfirst.
//!
//! Both are found before the body traversal and inserted ahead of it, so
//! they are allowed to collide with items the assembler finds later; the
//! final dedup pass resolves that.

use tracing::trace;

use crate::dom::{self, Document, NodeRef};
use crate::extractor::sanitize::Sanitizer;
use crate::filter::ExclusionFilter;
use crate::image::ImageResolver;
use crate::text::{char_len, collapse_whitespace};

/// Social-card metadata, in priority order: `(attribute, value)`.
const META_IMAGE_KEYS: &[(&str, &str)] = &[
    ("property", "og:image"),
    ("property", "og:image:secure_url"),
    ("name", "twitter:image"),
    ("property", "twitter:image"),
    ("name", "twitter:image:src"),
];

/// Media elements inspected in the container.
const MAX_MEDIA_SCANNED: usize = 10;

const LARGE_WIDTH: u32 = 400;
const LARGE_HEIGHT: u32 = 300;

const STANDFIRST_CLASS_MIN: usize = 20;
const STANDFIRST_CLASS_MAX: usize = 400;
const STANDFIRST_PARAGRAPH_MIN: usize = 50;
const STANDFIRST_PARAGRAPH_MAX: usize = 200;

/// The lead image of the article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedImage {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

/// The deck under the headline.
#[derive(Debug, Clone)]
pub struct Standfirst<'a> {
    pub text: String,
    pub html: String,
    /// Source element, so the assembler does not emit it a second time.
    pub node: NodeRef<'a>,
}

/// Social-card image first, then the first large or captioned image among
/// the container's first few `<img>` elements.
#[must_use]
pub fn find_featured_image(
    doc: &Document,
    container: Option<&NodeRef>,
    resolver: &ImageResolver,
) -> Option<FeaturedImage> {
    for (attr, key) in META_IMAGE_KEYS {
        let meta = doc.select_single(&format!(r#"meta[{attr}="{key}"]"#));
        let Some(content) = dom::get_attribute(&meta, "content") else {
            continue;
        };
        if let Some(src) = resolver.resolve_raw(&content) {
            trace!(key, %src, "featured image from metadata");
            let alt = meta_alt(doc).unwrap_or_default();
            return Some(FeaturedImage { src, alt, caption: String::new() });
        }
    }

    let container = container?;
    let images = dom::selection(container).select("img");
    images
        .nodes()
        .iter()
        .take(MAX_MEDIA_SCANNED)
        .find_map(|img| container_image(img, resolver))
}

/// `og:image:alt` or `twitter:image:alt`.
fn meta_alt(doc: &Document) -> Option<String> {
    [r#"meta[property="og:image:alt"]"#, r#"meta[name="twitter:image:alt"]"#]
        .iter()
        .find_map(|selector| dom::non_empty_attribute(&doc.select_single(selector), "content"))
        .map(|alt| collapse_whitespace(&alt))
}

fn container_image(img: &NodeRef, resolver: &ImageResolver) -> Option<FeaturedImage> {
    let src = resolver.resolve(img)?;
    if resolver.is_tracking_pixel(img, &src) || resolver.is_decorative(img, &src) {
        return None;
    }

    let sel = dom::selection(img);
    let figure = dom::bounded_ancestors(img, None, 3)
        .into_iter()
        .find(|a| dom::node_tag(a) == "figure");
    let captioned = figure
        .as_ref()
        .is_some_and(|f| dom::selection(f).select("figcaption").exists());
    let large = dom::attribute_dimension(&sel, "width").is_some_and(|w| w >= LARGE_WIDTH)
        || dom::attribute_dimension(&sel, "height").is_some_and(|h| h >= LARGE_HEIGHT);
    if !large && !captioned {
        return None;
    }

    let alt = dom::get_attribute(&sel, "alt")
        .map(|a| collapse_whitespace(&a))
        .unwrap_or_default();
    let caption = resolver.caption(figure.as_ref(), img, &alt);
    Some(FeaturedImage { src, alt, caption })
}

/// A class-matched deck (inside the container, then anywhere), else a short
/// link-free first paragraph that does not read like the story's opening.
#[must_use]
pub fn find_standfirst<'a>(
    doc: &'a Document,
    container: Option<&NodeRef<'a>>,
    filter: &ExclusionFilter,
    sanitizer: &Sanitizer,
) -> Option<Standfirst<'a>> {
    let rules = filter.rules();
    let scopes = container
        .map(|c| dom::selection(c).select("p, div, h2, span"))
        .into_iter()
        .chain(std::iter::once(doc.select("p, div, h2, span")));

    for scope in scopes {
        for node in scope.nodes() {
            let sel = dom::selection(node);
            if !rules.standfirst_class.is_match(&dom::get_attribute(&sel, "class").unwrap_or_default()) {
                continue;
            }
            let text = dom::visible_text(node);
            let len = char_len(&text);
            if !(STANDFIRST_CLASS_MIN..=STANDFIRST_CLASS_MAX).contains(&len) || filter.is_excluded(node) {
                continue;
            }
            return Some(standfirst_from(node, text, sanitizer));
        }
    }

    let container = container?;
    let first = dom::selection(container)
        .select("p")
        .nodes()
        .iter()
        .copied()
        .find(|p| !dom::visible_text(p).is_empty())?;

    let text = dom::visible_text(&first);
    let len = char_len(&text);
    if !(STANDFIRST_PARAGRAPH_MIN..=STANDFIRST_PARAGRAPH_MAX).contains(&len) {
        return None;
    }
    if dom::selection(&first).select("a").exists() || filter.is_excluded(&first) {
        return None;
    }
    let opener = text
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .unwrap_or_default();
    if rules.tables().narrative_openers.iter().any(|o| *o == opener) {
        return None;
    }
    Some(standfirst_from(&first, text, sanitizer))
}

fn standfirst_from<'a>(node: &NodeRef<'a>, text: String, sanitizer: &Sanitizer) -> Standfirst<'a> {
    trace!(chars = char_len(&text), "standfirst found");
    Standfirst {
        html: sanitizer.inline_html(node),
        text,
        node: *node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::rules::DEFAULT_RULES;
    use url::Url;

    fn featured(html: &str, base: Option<&Url>) -> Option<FeaturedImage> {
        let doc = parse(html);
        let resolver = ImageResolver::new(&DEFAULT_RULES, base, 50);
        let container = doc.select_single("article").nodes().first().copied();
        find_featured_image(&doc, container.as_ref(), &resolver)
    }

    /// `(text, html)` of the standfirst.
    fn standfirst(html: &str) -> Option<(String, String)> {
        let doc = parse(html);
        let filter = ExclusionFilter::new(&DEFAULT_RULES, 50);
        let sanitizer = Sanitizer::new(&DEFAULT_RULES, None);
        let container = doc.select_single("article").nodes().first().copied();
        find_standfirst(&doc, container.as_ref(), &filter, &sanitizer).map(|s| (s.text, s.html))
    }

    #[test]
    fn og_image_is_resolved_against_base() {
        let base = Url::parse("https://example.com/news/story").ok();
        let html = r#"<head><meta property="og:image" content="/img/lead.jpg"><meta property="og:image:alt" content="Flooded street"></head><body></body>"#;
        let Some(image) = featured(html, base.as_ref()) else {
            panic!("expected a featured image");
        };
        assert_eq!(image.src, "https://example.com/img/lead.jpg");
        assert_eq!(image.alt, "Flooded street");
    }

    #[test]
    fn logo_card_falls_through_to_twitter_image() {
        let html = r#"<head>
            <meta property="og:image" content="https://example.com/static/site-logo.png">
            <meta name="twitter:image" content="https://example.com/img/photo.jpg">
        </head><body></body>"#;
        assert_eq!(featured(html, None).map(|i| i.src).as_deref(), Some("https://example.com/img/photo.jpg"));
    }

    #[test]
    fn large_container_image_is_used() {
        let html = r#"<article>
            <img src="https://example.com/icon.png" width="16" height="16">
            <img src="https://example.com/lead.jpg" width="1200" height="600" alt="Lead">
        </article>"#;
        let Some(image) = featured(html, None) else {
            panic!("expected a featured image");
        };
        assert_eq!(image.src, "https://example.com/lead.jpg");
        assert_eq!(image.alt, "Lead");
    }

    #[test]
    fn captioned_figure_image_is_used() {
        let html = r#"<article><figure><img src="https://example.com/a.jpg" alt="Heron"><figcaption>A heron at dawn</figcaption></figure></article>"#;
        let Some(image) = featured(html, None) else {
            panic!("expected a featured image");
        };
        assert_eq!(image.caption, "A heron at dawn");
    }

    #[test]
    fn small_uncaptioned_images_are_not_featured() {
        let html = r#"<article><img src="https://example.com/a.jpg" width="200" height="100"></article>"#;
        assert_eq!(featured(html, None), None);
    }

    #[test]
    fn class_matched_standfirst() {
        let html = r#"<article><h1>Storm closes bridge</h1><p class="standfirst">Council says <em>repairs</em> will take months.</p><p>The rest.</p></article>"#;
        let Some((text, html)) = standfirst(html) else {
            panic!("expected a standfirst");
        };
        assert_eq!(text, "Council says repairs will take months.");
        assert_eq!(html, "Council says <em>repairs</em> will take months.");
    }

    #[test]
    fn short_first_paragraph_is_standfirst() {
        let html = "<article><p>Engineers warn the crossing may stay shut until the spring thaw.</p><p>Body.</p></article>";
        assert_eq!(
            standfirst(html).map(|(text, _)| text).as_deref(),
            Some("Engineers warn the crossing may stay shut until the spring thaw.")
        );
    }

    #[test]
    fn narrative_opener_is_not_standfirst() {
        let html = "<article><p>The bridge closed on Tuesday after engineers found cracks in a pier.</p></article>";
        assert_eq!(standfirst(html), None);
    }

    #[test]
    fn linked_or_long_first_paragraph_is_not_standfirst() {
        let html = r#"<article><p>Engineers warn the crossing may stay shut, <a href="/x">officials say</a> today.</p></article>"#;
        assert_eq!(standfirst(html), None);
        let long = format!("<article><p>Engineers {}</p></article>", "warn ".repeat(60));
        assert_eq!(standfirst(&long), None);
    }
}
