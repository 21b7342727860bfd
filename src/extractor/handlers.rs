//! Element handlers: one content item per tag family.
//!
//! Each handler receives a node that already passed the exclusion filter and
//! returns the item it builds, or `None` when the node carries nothing worth
//! emitting. Handlers for block containers (figures, quotes, code, lists,
//! tables) consume their subtree so nested content tags are not visited a
//! second time.

use tracing::trace;

use crate::dom::{self, NodeId, NodeRef};
use crate::filter::structural;
use crate::patterns::{BYLINE_LINE, DATE_ONLY_LINE, HEADING_BY_SUFFIX, LANGUAGE_CLASS, NUMERIC_ONLY};
use crate::result::ContentItem;
use crate::text::{char_len, collapse_whitespace, strip_markers, word_count};

use super::sanitize::code_text;
use super::state::AssemblyState;
use super::Assembler;

/// Longest line still treated as a standalone byline.
const BYLINE_MAX_WORDS: usize = 5;

/// Date-only paragraphs longer than this are prose.
const DATE_LINE_MAX_CHARS: usize = 100;

/// Non-link text allowed in a footnote-only paragraph.
const FOOTNOTE_RESIDUE_MAX: usize = 10;

/// Paragraphs at or above this length skip the phrase tables.
const NAVIGATION_TEXT_LIMIT: usize = 200;

/// Smallest table kept on text alone.
const TABLE_MIN_CHARS: usize = 50;

impl Assembler<'_> {
    /// Dispatch on tag. `scope` is the root of the current pass.
    pub fn handle(
        &self,
        node: &NodeRef,
        tag: &str,
        state: &mut AssemblyState,
        scope: Option<NodeId>,
    ) -> Option<ContentItem> {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.heading(node, tag, state, scope),
            "p" => self.paragraph(node),
            "img" => self.image(node, state),
            "figure" => self.figure(node, state),
            "blockquote" => self.quote(node, state),
            "pre" | "code" => self.code(node, state),
            "ul" | "ol" => self.list(node, tag, state),
            "table" => self.table(node, state),
            _ => None,
        }
    }

    fn heading(
        &self,
        node: &NodeRef,
        tag: &str,
        state: &mut AssemblyState,
        scope: Option<NodeId>,
    ) -> Option<ContentItem> {
        let level = dom::heading_level(tag)?;
        let mut text = strip_markers(&dom::visible_text(node));
        if text.is_empty() || NUMERIC_ONLY.is_match(&text) {
            return None;
        }
        if self.in_accordion(node, scope) {
            trace!(%text, "heading inside collapsible section");
            return None;
        }
        if let Some(title_part) = HEADING_BY_SUFFIX.captures(&text).and_then(|c| c.get(1)) {
            text = title_part.as_str().trim().to_string();
        }
        if state.is_title(&text) || !state.insert_heading(&text) {
            return None;
        }
        Some(ContentItem::Heading {
            level,
            text,
            id: dom::non_empty_attribute(&dom::selection(node), "id"),
        })
    }

    fn in_accordion(&self, node: &NodeRef, scope: Option<NodeId>) -> bool {
        dom::bounded_ancestors(node, scope, self.max_hops)
            .iter()
            .any(|a| self.rules.accordion_class.is_match(&dom::id_class(&dom::selection(a))))
    }

    fn paragraph(&self, node: &NodeRef) -> Option<ContentItem> {
        let text = dom::visible_text(node);
        if text.is_empty() || self.is_paragraph_noise(node, &text) {
            return None;
        }
        let html = self.sanitizer.inline_html(node);
        if html.is_empty() {
            return None;
        }
        Some(ContentItem::Paragraph { html })
    }

    /// Bylines, metadata lines, bare dates, footnote-only lines and
    /// navigation phrasing.
    fn is_paragraph_noise(&self, node: &NodeRef, text: &str) -> bool {
        let sel = dom::selection(node);
        let links = sel.select("a").length();

        if word_count(text) <= BYLINE_MAX_WORDS && BYLINE_LINE.is_match(text) && links <= 1 {
            return true;
        }
        if self.rules.is_metadata_line(text) {
            return true;
        }
        if char_len(text) <= DATE_LINE_MAX_CHARS && DATE_ONLY_LINE.is_match(text) {
            return true;
        }
        if links > 0 && is_footnote_only(node) {
            return true;
        }
        char_len(text) < NAVIGATION_TEXT_LIMIT && self.rules.is_navigation_text(text)
    }

    fn image(&self, node: &NodeRef, state: &mut AssemblyState) -> Option<ContentItem> {
        self.image_item(node, None, state)
    }

    fn figure(&self, node: &NodeRef, state: &mut AssemblyState) -> Option<ContentItem> {
        let img = dom::selection(node).select("img").nodes().first().copied()?;
        state.consume(node);
        self.image_item(&img, Some(node), state)
    }

    fn image_item(
        &self,
        img: &NodeRef,
        figure: Option<&NodeRef>,
        state: &mut AssemblyState,
    ) -> Option<ContentItem> {
        let src = self.resolver.resolve(img)?;
        if self.resolver.is_tracking_pixel(img, &src) || self.resolver.is_decorative(img, &src) {
            trace!(%src, "skipping non-content image");
            return None;
        }
        if !state.insert_image(&src) {
            return None;
        }
        let alt = dom::get_attribute(&dom::selection(img), "alt")
            .map(|a| collapse_whitespace(&a))
            .unwrap_or_default();
        let caption = self.resolver.caption(figure, img, &alt);
        Some(ContentItem::Image {
            src,
            alt,
            caption,
            is_featured: false,
        })
    }

    fn quote(&self, node: &NodeRef, state: &mut AssemblyState) -> Option<ContentItem> {
        state.consume(node);
        let html = self.sanitizer.inline_html(node);
        (!html.is_empty()).then_some(ContentItem::Quote { html })
    }

    fn code(&self, node: &NodeRef, state: &mut AssemblyState) -> Option<ContentItem> {
        state.consume(node);
        let text = code_text(node);
        if text.trim().is_empty() {
            return None;
        }
        Some(ContentItem::Code {
            language: code_language(node),
            text,
        })
    }

    fn list(&self, node: &NodeRef, tag: &str, state: &mut AssemblyState) -> Option<ContentItem> {
        state.consume(node);
        let items: Vec<String> = dom::element_children(node)
            .iter()
            .filter(|child| dom::node_tag(child) == "li")
            .map(|li| strip_markers(&dom::visible_text(li)))
            .filter(|text| !text.is_empty())
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(ContentItem::List {
            ordered: tag == "ol",
            items,
        })
    }

    fn table(&self, node: &NodeRef, state: &mut AssemblyState) -> Option<ContentItem> {
        state.consume(node);
        if !self.include_tables {
            return None;
        }
        let sel = dom::selection(node);
        let rows = sel.select("tr");
        let row_count = rows.length();
        let col_count = rows
            .nodes()
            .iter()
            .map(|tr| {
                dom::element_children(tr)
                    .iter()
                    .filter(|c| matches!(dom::node_tag(c).as_str(), "td" | "th"))
                    .count()
            })
            .max()
            .unwrap_or(0);
        let substantial = (row_count >= 2 && col_count >= 2) || dom::visible_text_len(node) >= TABLE_MIN_CHARS;
        if !substantial {
            return None;
        }
        Some(ContentItem::Table {
            html: self.sanitizer.table_html(node),
        })
    }
}

/// Every link is a footnote reference or back-link, and almost no text sits
/// outside the links.
fn is_footnote_only(node: &NodeRef) -> bool {
    let links = dom::selection(node).select("a");
    let all_footnotes = links.nodes().iter().all(|a| {
        let sel = dom::selection(a);
        structural::is_footnote_link(&sel) || structural::is_footnote_backlink(&sel)
    });
    if !all_footnotes {
        return false;
    }
    let visible = |text: &str| text.chars().filter(|c| !c.is_whitespace()).count();
    let total = visible(&dom::visible_text(node));
    let linked: usize = links.nodes().iter().map(|a| visible(&dom::visible_text(a))).sum();
    total.saturating_sub(linked) < FOOTNOTE_RESIDUE_MAX
}

/// `language-xxx` on the block or its inner `<code>`, then `data-lang`.
fn code_language(node: &NodeRef) -> String {
    let sel = dom::selection(node);
    let inner = sel.select("code");
    let classes = [
        dom::get_attribute(&sel, "class"),
        dom::get_attribute(&inner, "class"),
    ];
    classes
        .iter()
        .flatten()
        .find_map(|class| LANGUAGE_CLASS.captures(class).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_lowercase())
        .or_else(|| {
            ["data-lang", "data-language"]
                .iter()
                .find_map(|attr| dom::non_empty_attribute(&sel, attr))
                .map(|lang| lang.trim().to_lowercase())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::options::Options;
    use crate::rules::DEFAULT_RULES;

    fn handle_first(html: &str, selector: &str, title: &str) -> Option<ContentItem> {
        let doc = parse(html);
        let options = Options::default();
        let assembler = Assembler::new(&DEFAULT_RULES, None, &options);
        let mut state = AssemblyState::new(title);
        let node = doc.select(selector).nodes().first().copied()?;
        let tag = dom::node_tag(&node);
        assembler.handle(&node, &tag, &mut state, None)
    }

    #[test]
    fn heading_equal_to_title_is_dropped() {
        assert_eq!(handle_first("<h2>My  Title</h2>", "h2", "my title"), None);
    }

    #[test]
    fn heading_credit_suffix_is_split() {
        let item = handle_first("<h2 id=\"s1\">How Rivers Move by Jane Doe</h2>", "h2", "Other");
        assert_eq!(
            item,
            Some(ContentItem::Heading {
                level: 2,
                text: "How Rivers Move".to_string(),
                id: Some("s1".to_string()),
            })
        );
    }

    #[test]
    fn numeric_and_accordion_headings_are_dropped() {
        assert_eq!(handle_first("<h3>2.</h3>", "h3", "T"), None);
        assert_eq!(
            handle_first(r#"<div class="accordion"><h3>Shipping details</h3></div>"#, "h3", "T"),
            None
        );
    }

    #[test]
    fn paragraph_noise_is_skipped() {
        assert_eq!(handle_first("<p>By Jane Doe</p>", "p", "T"), None);
        assert_eq!(handle_first("<p>Edited by Sam Lee</p>", "p", "T"), None);
        assert_eq!(handle_first("<p>1,250 words</p>", "p", "T"), None);
        assert_eq!(handle_first("<p>March 3, 2024</p>", "p", "T"), None);
        assert_eq!(handle_first("<p>Read more: the full timeline</p>", "p", "T"), None);
    }

    #[test]
    fn footnote_only_paragraph_is_skipped() {
        let html = r##"<p><a href="#fnref1">↩</a> <a href="#fnref2">↩</a></p>"##;
        assert_eq!(handle_first(html, "p", "T"), None);
    }

    #[test]
    fn byline_like_sentence_is_kept() {
        let html = "<p>By the end of the week, the water had reached the second floor of the library.</p>";
        assert!(matches!(handle_first(html, "p", "T"), Some(ContentItem::Paragraph { .. })));
    }

    #[test]
    fn figure_uses_figcaption() {
        let html = r#"<figure><img src="https://example.com/heron.jpg" alt="Heron"><figcaption>A heron at dawn</figcaption></figure>"#;
        assert_eq!(
            handle_first(html, "figure", "T"),
            Some(ContentItem::Image {
                src: "https://example.com/heron.jpg".to_string(),
                alt: "Heron".to_string(),
                caption: "A heron at dawn".to_string(),
                is_featured: false,
            })
        );
    }

    #[test]
    fn tracking_pixel_is_skipped() {
        let html = r#"<img src="https://example.com/p.gif" width="1" height="1">"#;
        assert_eq!(handle_first(html, "img", "T"), None);
    }

    #[test]
    fn code_block_language_and_breaks() {
        let html = r#"<pre class="language-rust"><code>let x = 1;<br>let y = 2;</code></pre>"#;
        assert_eq!(
            handle_first(html, "pre", "T"),
            Some(ContentItem::Code {
                language: "rust".to_string(),
                text: "let x = 1;\nlet y = 2;".to_string(),
            })
        );
    }

    #[test]
    fn list_items_are_flattened() {
        let html = "<ol><li>First <b>step</b></li><li> </li><li>Second step</li></ol>";
        assert_eq!(
            handle_first(html, "ol", "T"),
            Some(ContentItem::List {
                ordered: true,
                items: vec!["First step".to_string(), "Second step".to_string()],
            })
        );
    }

    #[test]
    fn tiny_tables_are_dropped() {
        assert_eq!(handle_first("<table><tr><td>x</td></tr></table>", "table", "T"), None);
        let html = "<table><tr><th>Year</th><th>Level</th></tr><tr><td>2023</td><td>4.1m</td></tr></table>";
        assert!(matches!(handle_first(html, "table", "T"), Some(ContentItem::Table { .. })));
    }

    #[test]
    fn tables_respect_option() {
        let doc = parse("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>");
        let options = Options {
            include_tables: false,
            ..Options::default()
        };
        let assembler = Assembler::new(&DEFAULT_RULES, None, &options);
        let mut state = AssemblyState::new("T");
        let node = doc.select("table").nodes().first().copied();
        let item = node.and_then(|n| assembler.handle(&n, "table", &mut state, None));
        assert_eq!(item, None);
    }
}
