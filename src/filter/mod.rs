//! Element classifier / exclusion filter.
//!
//! Decides whether a node is boilerplate. Stages run in a fixed order and
//! short-circuit on the first match:
//!
//! 1. [`visibility`]: inline hidden state, sparing lazy-loaded images
//! 2. [`structural`]: iframes, footnote back-links, icons, asides, newsletter forms
//! 3. [`classes`]: class/id blacklist
//! 4. [`text`]: phrase tables for short paragraphs and headings
//! 5. [`heading`]: advert, resource and literal boilerplate headings
//! 6. [`ancestors`]: bounded ancestor walk
//!
//! The lenient mode used by the fallback ladder runs stages 1 and 2 only.
//! The filter never mutates the tree.

pub mod ancestors;
pub mod classes;
pub mod heading;
pub mod structural;
pub mod text;
pub mod visibility;

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;

use tracing::trace;

use crate::dom::{self, NodeId, NodeRef, Selection};
use crate::rules::CompiledRules;

/// Why a node was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExclusionReason {
    Hidden,
    Iframe,
    AdIframe,
    FootnoteBacklink,
    DecorativeIcon,
    Aside,
    NewsletterForm,
    ExcludedClass,
    NavigationText,
    CourseAd,
    MetadataLine,
    Solicitation,
    AdvertHeading,
    ResourceHeading,
    BoilerplateHeading,
    AncestorAd,
    AncestorStructural,
    AncestorClass,
    AncestorHidden,
    AncestorNewsletter,
    AncestorNavigation,
}

impl ExclusionReason {
    /// Stable snake_case name used in debug counters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Iframe => "iframe",
            Self::AdIframe => "ad_iframe",
            Self::FootnoteBacklink => "footnote_backlink",
            Self::DecorativeIcon => "decorative_icon",
            Self::Aside => "aside",
            Self::NewsletterForm => "newsletter_form",
            Self::ExcludedClass => "excluded_class",
            Self::NavigationText => "navigation_text",
            Self::CourseAd => "course_ad",
            Self::MetadataLine => "metadata_line",
            Self::Solicitation => "solicitation",
            Self::AdvertHeading => "advert_heading",
            Self::ResourceHeading => "resource_heading",
            Self::BoilerplateHeading => "boilerplate_heading",
            Self::AncestorAd => "ancestor_ad",
            Self::AncestorStructural => "ancestor_structural",
            Self::AncestorClass => "ancestor_class",
            Self::AncestorHidden => "ancestor_hidden",
            Self::AncestorNewsletter => "ancestor_newsletter",
            Self::AncestorNavigation => "ancestor_navigation",
        }
    }
}

/// Per-node facts shared by the stages. Text is computed on first use.
pub struct NodeInfo<'a> {
    pub node: NodeRef<'a>,
    pub sel: Selection<'a>,
    pub tag: String,
    pub id_class: String,
    text: OnceCell<String>,
}

impl<'a> NodeInfo<'a> {
    #[must_use]
    pub fn new(node: &NodeRef<'a>) -> Self {
        let sel = dom::selection(node);
        let id_class = dom::id_class(&sel);
        Self {
            node: *node,
            tag: dom::node_tag(node),
            id_class,
            sel,
            text: OnceCell::new(),
        }
    }

    /// Visible text, whitespace collapsed.
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| dom::visible_text(&self.node))
    }

    /// Character length of [`Self::text`].
    pub fn text_len(&self) -> usize {
        self.text().chars().count()
    }

    #[must_use]
    pub fn is_heading(&self) -> bool {
        dom::is_heading_tag(&self.tag)
    }

    #[must_use]
    pub fn is_image_like(&self) -> bool {
        matches!(self.tag.as_str(), "img" | "figure" | "picture")
    }
}

/// Boilerplate classifier bound to one rule set and one extraction call.
pub struct ExclusionFilter<'r> {
    rules: &'r CompiledRules,
    container: Option<NodeId>,
    max_hops: usize,
    lenient: bool,
    ancestor_cache: RefCell<HashMap<NodeId, ancestors::AncestorVerdict>>,
}

impl<'r> ExclusionFilter<'r> {
    #[must_use]
    pub fn new(rules: &'r CompiledRules, max_hops: usize) -> Self {
        Self {
            rules,
            container: None,
            max_hops,
            lenient: false,
            ancestor_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Stop ancestor walks at `container`.
    #[must_use]
    pub fn with_container(mut self, container: Option<NodeId>) -> Self {
        self.container = container;
        self
    }

    /// Run only the visibility and structural stages.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &'r CompiledRules {
        self.rules
    }

    /// Whether `node` is boilerplate.
    #[must_use]
    pub fn is_excluded(&self, node: &NodeRef) -> bool {
        self.check(node).is_some()
    }

    /// The first stage that excludes `node`, if any.
    #[must_use]
    pub fn check(&self, node: &NodeRef) -> Option<ExclusionReason> {
        if !node.is_element() {
            return None;
        }
        let info = NodeInfo::new(node);
        let reason = self.check_info(&info);
        if let Some(reason) = reason {
            trace!(tag = %info.tag, id_class = %info.id_class, reason = reason.as_str(), "excluded");
        }
        reason
    }

    fn check_info(&self, info: &NodeInfo) -> Option<ExclusionReason> {
        if let Some(reason) = visibility::check(info, self.rules) {
            return Some(reason);
        }
        if let Some(reason) = structural::check(info, self.rules) {
            return Some(reason);
        }
        if self.lenient {
            return None;
        }
        classes::check(info, self.rules)
            .or_else(|| text::check(info, self.rules))
            .or_else(|| heading::check(info, self.rules))
            .or_else(|| {
                ancestors::check(
                    info,
                    self.rules,
                    self.container,
                    self.max_hops,
                    &self.ancestor_cache,
                )
            })
    }
}
