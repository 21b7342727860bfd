//! HTML sanitization by rebuilding.
//!
//! The source tree is never touched: each block is re-serialized from the
//! read-only DOM, keeping only allowlisted tags and attributes. The walk uses
//! an explicit stack, so arbitrarily deep inline nesting cannot overflow.

use url::Url;

use crate::dom::{self, NodeRef};
use crate::filter::{structural, NodeInfo};
use crate::patterns::WHITESPACE;
use crate::rules::CompiledRules;
use crate::url_utils::resolve_href;

/// Inline tags kept in paragraph, quote and standfirst HTML.
const INLINE_TAGS: &[&str] = &["a", "b", "strong", "i", "em", "code", "br"];

/// Structural tags additionally kept inside tables.
const TABLE_TAGS: &[&str] = &[
    "table", "caption", "colgroup", "col", "thead", "tbody", "tfoot", "tr", "th", "td",
];

/// Attributes that survive sanitization.
const ALLOWED_ATTRIBUTES: &[&str] = &["href", "src", "alt", "title", "class", "id", "target", "rel"];

/// Extra attributes kept on table cells.
const TABLE_ATTRIBUTES: &[&str] = &["colspan", "rowspan", "scope"];

/// Elements dropped with their content.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "iframe", "object", "embed", "button",
    "input", "select", "textarea", "form", "img", "picture", "video", "audio", "canvas", "map",
    "figure",
];

/// Unwrapped elements that separate words.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "section", "article", "header", "footer", "blockquote", "ul", "ol", "dl",
    "dt", "dd", "h1", "h2", "h3", "h4", "h5", "h6", "pre",
];

/// Output cap for a single block.
const MAX_OUTPUT_LEN: usize = 200_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inline,
    Table,
}

enum Frame<'a> {
    Enter(NodeRef<'a>),
    Close {
        tag: String,
        open_start: usize,
        content_start: usize,
    },
    Space,
}

/// Rebuilds sanitized HTML fragments.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer<'r> {
    rules: &'r CompiledRules,
    base: Option<&'r Url>,
}

impl<'r> Sanitizer<'r> {
    #[must_use]
    pub fn new(rules: &'r CompiledRules, base: Option<&'r Url>) -> Self {
        Self { rules, base }
    }

    /// Children of `node` as inline HTML: links, bold, italic, code and line
    /// breaks only.
    #[must_use]
    pub fn inline_html(&self, node: &NodeRef) -> String {
        let children: Vec<NodeRef> = node.children().into_iter().collect();
        self.rebuild(children, Mode::Inline)
    }

    /// A whole `<table>` with structure kept and styles/handlers removed.
    #[must_use]
    pub fn table_html(&self, table: &NodeRef) -> String {
        self.rebuild(vec![*table], Mode::Table)
    }

    fn rebuild(&self, roots: Vec<NodeRef>, mode: Mode) -> String {
        let mut out = String::new();
        let mut stack: Vec<Frame> = roots.into_iter().rev().map(Frame::Enter).collect();

        while let Some(frame) = stack.pop() {
            if out.len() > MAX_OUTPUT_LEN {
                break;
            }
            match frame {
                Frame::Space => out.push(' '),
                Frame::Close { tag, open_start, content_start } => {
                    let empty = out[content_start..].trim().is_empty();
                    if empty && mode == Mode::Inline {
                        out.truncate(open_start);
                    } else {
                        out.push_str("</");
                        out.push_str(&tag);
                        out.push('>');
                    }
                }
                Frame::Enter(node) => {
                    if node.is_text() {
                        out.push_str(&dom::escape_html(&WHITESPACE.replace_all(&node.text(), " ")));
                        continue;
                    }
                    if !node.is_element() {
                        continue;
                    }
                    self.enter_element(node, mode, &mut out, &mut stack);
                }
            }
        }

        WHITESPACE.replace_all(out.trim(), " ").into_owned()
    }

    fn enter_element<'a>(&self, node: NodeRef<'a>, mode: Mode, out: &mut String, stack: &mut Vec<Frame<'a>>) {
        let tag = dom::node_tag(&node);
        if self.is_dropped(&node, &tag) {
            return;
        }

        let kept = INLINE_TAGS.contains(&tag.as_str())
            || (mode == Mode::Table && TABLE_TAGS.contains(&tag.as_str()));
        let children: Vec<NodeRef<'a>> = node.children().into_iter().collect();

        if !kept {
            let block = BLOCK_TAGS.contains(&tag.as_str());
            if block {
                stack.push(Frame::Space);
            }
            stack.extend(children.into_iter().rev().map(Frame::Enter));
            if block {
                stack.push(Frame::Space);
            }
            return;
        }

        let open_start = out.len();
        out.push('<');
        out.push_str(&tag);
        self.push_attributes(&node, &tag, mode, out);
        out.push('>');

        if dom::is_void_tag(&tag) {
            return;
        }
        stack.push(Frame::Close {
            tag,
            open_start,
            content_start: out.len(),
        });
        stack.extend(children.into_iter().rev().map(Frame::Enter));
    }

    fn is_dropped(&self, node: &NodeRef, tag: &str) -> bool {
        if DROPPED_TAGS.contains(&tag) {
            return true;
        }
        let sel = dom::selection(node);
        if dom::is_hidden(&sel) {
            return true;
        }
        if tag == "a" && structural::is_footnote_link(&sel) {
            return true;
        }
        matches!(tag, "i" | "span" | "a" | "button" | "em" | "b" | "use")
            && is_leaf(node)
            && structural::is_decorative_icon(&NodeInfo::new(node), self.rules)
    }

    fn push_attributes(&self, node: &NodeRef, tag: &str, mode: Mode, out: &mut String) {
        let sel = dom::selection(node);
        for (name, value) in dom::get_all_attributes(&sel) {
            let name = name.to_ascii_lowercase();
            let allowed = ALLOWED_ATTRIBUTES.contains(&name.as_str())
                || (mode == Mode::Table && TABLE_ATTRIBUTES.contains(&name.as_str()));
            if !allowed {
                continue;
            }
            let value = if name == "href" || name == "src" {
                match resolve_href(&value, self.base) {
                    Some(resolved) => resolved,
                    None => continue,
                }
            } else {
                value
            };
            if name == "target" && tag != "a" {
                continue;
            }
            out.push(' ');
            out.push_str(&name);
            out.push_str("=\"");
            out.push_str(&dom::escape_html(&value));
            out.push('"');
        }
    }
}

/// No element children.
fn is_leaf(node: &NodeRef) -> bool {
    node.children().into_iter().all(|c| !c.is_element())
}

/// Text of a code block: `<br>` becomes a newline, every other tag is
/// dropped, entities arrive already decoded from the parser.
#[must_use]
pub fn code_text(node: &NodeRef) -> String {
    let mut out = String::new();
    for child in node.descendants() {
        if child.is_text() {
            let inside_dropped = child
                .parent()
                .is_some_and(|p| matches!(dom::node_tag(&p).as_str(), "script" | "style"));
            if !inside_dropped {
                out.push_str(&child.text());
            }
        } else if dom::node_tag(&child) == "br" {
            out.push('\n');
        }
    }
    out.trim_matches('\n').trim_end().to_string()
}
