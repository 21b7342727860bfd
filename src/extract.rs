//! Extraction orchestration and the outer error boundary.
//!
//! Order of work: base URL, metadata, container, featured image and
//! standfirst, body assembly with its fallback ladder, final dedup. Any
//! error or panic is caught once here and folded into the result.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, warn};
use url::Url;

use crate::dedup::dedup;
use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::extractor::fallback::first_landmark;
use crate::extractor::{assemble_with_fallback, Assembler};
use crate::filter::ExclusionFilter;
use crate::metadata::{self, document_title};
use crate::options::Options;
use crate::result::{ContentItem, DebugInfo, ExtractionResult};
use crate::selector::{self, describe};
use crate::url_utils::is_absolute_url;

/// Run the pipeline on a parsed document. Never fails: errors and panics
/// come back as an error result.
pub(crate) fn extract_document(doc: &Document, options: &Options) -> ExtractionResult {
    match panic::catch_unwind(AssertUnwindSafe(|| run(doc, options))) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => error_result(doc, &err),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error_result(doc, &Error::Panic(message))
        }
    }
}

/// Parse and run.
pub(crate) fn extract_html(html: &str, options: &Options) -> ExtractionResult {
    let doc = dom::parse(html);
    extract_document(&doc, options)
}

fn error_result(doc: &Document, err: &Error) -> ExtractionResult {
    warn!(error = %err, "extraction failed");
    let title = panic::catch_unwind(AssertUnwindSafe(|| document_title(doc))).unwrap_or_default();
    ExtractionResult {
        title,
        error: Some(err.to_string()),
        error_stack: Some(format!("{err:?}")),
        ..ExtractionResult::default()
    }
}

fn run(doc: &Document, options: &Options) -> Result<ExtractionResult> {
    if options.max_ancestor_hops == 0 {
        return Err(Error::ExtractionError("max_ancestor_hops must be at least 1".to_string()));
    }
    let started = Instant::now();
    let rules = options.rules();
    let hops = options.max_ancestor_hops;

    let base = resolve_base_url(doc, options.base_url.as_deref());
    debug!(base = ?base.as_ref().map(Url::as_str), "base url");

    let meta = metadata::extract_metadata(doc, &rules);

    let locator_filter = ExclusionFilter::new(&rules, hops);
    let located = selector::locate_container(doc, &locator_filter);
    let container = located.as_ref().map(|l| l.node);
    let content_root = container.or_else(|| first_landmark(doc));

    let assembler = Assembler::new(&rules, base.as_ref(), options);

    let featured = if options.featured_image {
        metadata::find_featured_image(doc, content_root.as_ref(), assembler.resolver())
    } else {
        None
    };
    let standfirst = if options.standfirst {
        let filter = ExclusionFilter::new(&rules, hops).with_container(content_root.map(|n| n.id));
        metadata::find_standfirst(doc, content_root.as_ref(), &filter, assembler.sanitizer())
    } else {
        None
    };

    let assembly = assemble_with_fallback(
        doc,
        container.as_ref(),
        &assembler,
        &meta.title,
        standfirst.as_ref().map(|s| &s.node),
    );

    let mut content = Vec::with_capacity(assembly.items.len() + 2);
    if let Some(image) = featured {
        content.push(ContentItem::Image {
            src: image.src,
            alt: image.alt,
            caption: image.caption,
            is_featured: true,
        });
    }
    if let Some(deck) = standfirst {
        content.push(ContentItem::Subtitle {
            text: deck.text,
            html: deck.html,
        });
    }
    content.extend(assembly.items);
    let (content, removed) = dedup(content, &meta.title);
    debug!(items = content.len(), removed, tier = ?assembly.tier, "content assembled");

    let debug_info = options.debug.then(|| {
        let (tag, id, class) = assembly
            .root
            .as_ref()
            .map(describe)
            .map_or((None, None, None), |(tag, id, class)| (Some(tag), id, class));
        DebugInfo {
            container_tag: tag,
            container_id: id,
            container_class: class,
            container_score: located.as_ref().map_or(0.0, |l| l.score),
            candidates_scored: located.as_ref().map_or(0, |l| l.candidates_scored),
            nodes_visited: assembly.stats.visited,
            nodes_excluded: assembly.stats.excluded,
            exclusion_reasons: assembly.stats.reasons.clone(),
            fallback: assembly.tier,
            dedup_removed: removed,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    });

    Ok(ExtractionResult {
        title: meta.title,
        author: meta.author,
        publish_date: meta.publish_date,
        content,
        debug_info,
        error: None,
        error_stack: None,
    })
}

/// Base for relative URLs: the caller's base (with any `<base href>` joined
/// onto it), then the document's own `<base href>`, canonical link and
/// `og:url`.
#[must_use]
pub fn resolve_base_url(doc: &Document, explicit: Option<&str>) -> Option<Url> {
    let explicit = explicit.and_then(is_absolute_url);
    let base_href = dom::non_empty_attribute(&doc.select_single("base[href]"), "href");

    if let Some(href) = base_href {
        let joined = match &explicit {
            Some(url) => url.join(href.trim()).ok().filter(|u| u.host().is_some()),
            None => is_absolute_url(&href),
        };
        if joined.is_some() {
            return joined;
        }
    }
    if explicit.is_some() {
        return explicit;
    }

    [
        (r#"link[rel="canonical"]"#, "href"),
        (r#"meta[property="og:url"]"#, "content"),
    ]
    .iter()
    .find_map(|(selector, attr)| {
        dom::non_empty_attribute(&doc.select_single(selector), attr).and_then(|v| is_absolute_url(&v))
    })
}
