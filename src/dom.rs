//! Read-only document tree adapter.
//!
//! Thin free functions over `dom_query` giving the engine the handful of
//! capabilities it needs: tag names, attributes, class tokens, inline style,
//! parent/children/siblings, visible text and CSS queries. Nothing here
//! mutates the tree; HTML cleaning rebuilds strings instead
//! (see [`crate::extractor::sanitize`]).

pub use dom_query::{Document, NodeId, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::text::collapse_whitespace;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Wrap a single node as a selection.
#[inline]
#[must_use]
pub fn selection<'a>(node: &NodeRef<'a>) -> Selection<'a> {
    Selection::from(*node)
}

// === Tag / node information ===

/// Lowercase tag name of the first node in the selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Lowercase tag name of a node, empty for non-elements.
#[must_use]
pub fn node_tag(node: &NodeRef) -> String {
    if !node.is_element() {
        return String::new();
    }
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Whether the tag is one of `h1`..`h6`.
#[must_use]
pub fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Heading level for `h1`..`h6`.
#[must_use]
pub fn heading_level(tag: &str) -> Option<u8> {
    if !is_heading_tag(tag) {
        return None;
    }
    tag[1..].parse().ok()
}

// === Attributes ===

/// Any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Attribute value, trimmed, `None` when missing or blank.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `class` followed by `id`, space separated, for token matching.
#[must_use]
pub fn id_class(sel: &Selection) -> String {
    let class = sel.attr("class").map(|s| s.to_string()).unwrap_or_default();
    let id = sel.attr("id").map(|s| s.to_string()).unwrap_or_default();
    match (class.is_empty(), id.is_empty()) {
        (true, true) => String::new(),
        (false, true) => class,
        (true, false) => id,
        (false, false) => format!("{class} {id}"),
    }
}

/// All attributes as key-value pairs.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Inline `style`, lowercased with whitespace removed (`display:none`).
#[must_use]
pub fn inline_style(sel: &Selection) -> String {
    sel.attr("style")
        .map(|s| {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .unwrap_or_default()
}

/// Hidden through inline `display:none` / `visibility:hidden` or the
/// `hidden` attribute. A static tree has no computed style, so the inline
/// declaration is the only signal.
#[must_use]
pub fn is_hidden(sel: &Selection) -> bool {
    if sel.has_attr("hidden") {
        return true;
    }
    let style = inline_style(sel);
    style.contains("display:none") || style.contains("visibility:hidden")
}

/// Integer dimension from a `width`/`height` attribute ("300", "300px").
#[must_use]
pub fn attribute_dimension(sel: &Selection, name: &str) -> Option<u32> {
    let value = sel.attr(name)?;
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Integer dimension from inline CSS (`width:1px`).
#[must_use]
pub fn style_dimension(sel: &Selection, property: &str) -> Option<u32> {
    let style = inline_style(sel);
    let needle = format!("{property}:");
    let start = style
        .split(';')
        .find_map(|decl| decl.strip_prefix(needle.as_str()))?;
    let digits: String = start.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

// === Text ===

/// All descendant text, unnormalized.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Descendant text with whitespace collapsed and trimmed.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    collapse_whitespace(&sel.text())
}

/// Text a reader would see: skips `script`, `style`, `noscript` and
/// `template` content, then collapses whitespace.
#[must_use]
pub fn visible_text(node: &NodeRef) -> String {
    let mut out = String::new();
    for child in node.descendants() {
        if !child.is_text() {
            continue;
        }
        let hidden_parent = child.parent().is_some_and(|parent| {
            matches!(
                node_tag(&parent).as_str(),
                "script" | "style" | "noscript" | "template"
            )
        });
        if hidden_parent {
            continue;
        }
        out.push_str(&child.text());
        out.push(' ');
    }
    collapse_whitespace(&out)
}

/// Character count of [`visible_text`].
#[must_use]
pub fn visible_text_len(node: &NodeRef) -> usize {
    visible_text(node).chars().count()
}

// === Tree navigation ===

/// Parent node if it is an element.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(dom_query::NodeRef::is_element)
}

/// Direct element children.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(dom_query::NodeRef::is_element)
        .collect()
}

/// Next element sibling, skipping text nodes.
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.next_sibling();
    }
    None
}

/// Element ancestors, nearest first, walked iteratively.
///
/// The walk stops before `stop` (the located container), at `body`/`html`,
/// or after `max_hops` steps, whichever comes first.
#[must_use]
pub fn bounded_ancestors<'a>(
    node: &NodeRef<'a>,
    stop: Option<NodeId>,
    max_hops: usize,
) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut current = parent_element(node);
    let mut hops = 0;

    while let Some(ancestor) = current {
        if hops >= max_hops {
            break;
        }
        if stop.is_some_and(|id| ancestor.id == id) {
            break;
        }
        if matches!(node_tag(&ancestor).as_str(), "body" | "html") {
            break;
        }
        current = parent_element(&ancestor);
        out.push(ancestor);
        hops += 1;
    }

    out
}

/// Whether any ancestor within `max_hops` has one of `tags`.
#[must_use]
pub fn has_ancestor_tag(node: &NodeRef, tags: &[&str], max_hops: usize) -> bool {
    let mut current = parent_element(node);
    let mut hops = 0;
    while let Some(ancestor) = current {
        if hops >= max_hops {
            return false;
        }
        if tags.contains(&node_tag(&ancestor).as_str()) {
            return true;
        }
        current = parent_element(&ancestor);
        hops += 1;
    }
    false
}

/// Whether `node` is `ancestor` or lies beneath it.
#[must_use]
pub fn is_within(node: &NodeRef, ancestor: NodeId) -> bool {
    if node.id == ancestor {
        return true;
    }
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == ancestor {
            return true;
        }
        current = parent.parent();
    }
    false
}

// === Querying ===

/// Number of descendants matching a CSS selector.
#[inline]
#[must_use]
pub fn count(sel: &Selection, selector: &str) -> usize {
    sel.select(selector).length()
}

// === Serialization helpers ===

/// Void elements never carry children or closing tags.
#[must_use]
pub fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "param" | "source" | "track" | "wbr"
    )
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_is_lowercase() {
        let doc = parse("<ARTICLE><SECTION>content</SECTION></ARTICLE>");
        assert_eq!(tag_name(&doc.select("article")), Some("article".to_string()));
        assert_eq!(tag_name(&doc.select("section")), Some("section".to_string()));
        assert_eq!(tag_name(&doc.select("span")), None);
    }

    #[test]
    fn test_id_class_combines_both() {
        let doc = parse(r#"<div id="main" class="post body">x</div><p>y</p>"#);
        assert_eq!(id_class(&doc.select("div")), "post body main");
        assert_eq!(id_class(&doc.select("p")), "");
    }

    #[test]
    fn test_hidden_detection() {
        let doc = parse(
            r#"<div id="a" style="display: none">a</div>
               <div id="b" style="Visibility:Hidden">b</div>
               <div id="c" hidden>c</div>
               <div id="d" style="color:red">d</div>"#,
        );
        assert!(is_hidden(&doc.select("#a")));
        assert!(is_hidden(&doc.select("#b")));
        assert!(is_hidden(&doc.select("#c")));
        assert!(!is_hidden(&doc.select("#d")));
    }

    #[test]
    fn test_dimensions() {
        let doc = parse(r#"<img width="300px" height="abc" style="width: 1px; height:2px">"#);
        let img = doc.select("img");
        assert_eq!(attribute_dimension(&img, "width"), Some(300));
        assert_eq!(attribute_dimension(&img, "height"), None);
        assert_eq!(style_dimension(&img, "width"), Some(1));
        assert_eq!(style_dimension(&img, "height"), Some(2));
    }

    #[test]
    fn test_visible_text_skips_scripts() {
        let doc = parse("<div>Hello <script>var x = 1;</script><style>p{}</style> world</div>");
        let div = doc.select("div");
        let node = div.nodes().first().copied();
        assert!(node.is_some());
        if let Some(node) = node {
            assert_eq!(visible_text(&node), "Hello world");
        }
    }

    #[test]
    fn test_bounded_ancestors_stop_at_container_and_cap() {
        let doc = parse(r#"<div id="outer"><div id="container"><div id="a"><div id="b"><p id="t">x</p></div></div></div></div>"#);
        let target = doc.select("#t").nodes().first().copied();
        let container = doc.select("#container").nodes().first().map(|n| n.id);
        let Some(target) = target else {
            panic!("target missing");
        };

        let ancestors = bounded_ancestors(&target, container, 50);
        assert_eq!(ancestors.len(), 2);

        let capped = bounded_ancestors(&target, None, 1);
        assert_eq!(capped.len(), 1);

        let unbounded = bounded_ancestors(&target, None, 50);
        assert_eq!(unbounded.len(), 4);
    }

    #[test]
    fn test_next_element_sibling_skips_text() {
        let doc = parse(r#"<div><p id="first">First</p>  <span id="second">Second</span></div>"#);
        let first = doc.select("#first").nodes().first().copied();
        let Some(first) = first else {
            panic!("first missing");
        };
        let next = next_element_sibling(&first);
        assert_eq!(next.map(|n| node_tag(&n)), Some("span".to_string()));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h3"), Some(3));
        assert_eq!(heading_level("p"), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let html = r#"<div id="container"><p class="text">First</p><p class="text">Second</p></div>"#;
        let doc = parse(html);
        let before = doc.html().to_string();
        let container = doc.select("#container");
        assert_eq!(count(&container, "p"), 2);
        assert_eq!(normalized_text(&container.select_single("p")), "First");
        assert_eq!(doc.html().to_string(), before);
    }
}
