//! Final deduplication pass.
//!
//! Runs over the fully assembled sequence, featured image and standfirst
//! included, keeping the first occurrence of every heading and image key.
//! Applying it to its own output changes nothing.

use std::collections::HashSet;

use crate::result::ContentItem;
use crate::text::{html_to_text, normalize_key};
use crate::url_utils::image_key;

/// Drop repeated headings, repeated images, headings equal to `title`, extra
/// subtitles and body paragraphs that repeat the subtitle.
///
/// Returns the kept items and how many were removed.
///
/// ```rust
/// use rs_article_heuristics::dedup::dedup;
/// use rs_article_heuristics::ContentItem;
///
/// let heading = |text: &str| ContentItem::Heading { level: 2, text: text.to_string(), id: None };
/// let (items, removed) = dedup(vec![heading("Intro"), heading("INTRO "), heading("My Title")], "My Title");
/// assert_eq!(items, vec![heading("Intro")]);
/// assert_eq!(removed, 2);
/// ```
#[must_use]
pub fn dedup(items: Vec<ContentItem>, title: &str) -> (Vec<ContentItem>, usize) {
    let title_key = normalize_key(title);
    let mut seen_headings: HashSet<String> = HashSet::new();
    let mut seen_images: HashSet<String> = HashSet::new();
    let mut subtitle_keys: Vec<String> = Vec::new();
    let mut seen_subtitle = false;

    let before = items.len();
    let kept: Vec<ContentItem> = items
        .into_iter()
        .filter(|item| match item {
            ContentItem::Heading { text, .. } => {
                let key = normalize_key(text);
                !(key.is_empty() || (!title_key.is_empty() && key == title_key)) && seen_headings.insert(key)
            }
            ContentItem::Image { src, .. } => seen_images.insert(image_key(src)),
            ContentItem::Subtitle { text, html } => {
                if seen_subtitle {
                    return false;
                }
                seen_subtitle = true;
                subtitle_keys.push(normalize_key(text));
                subtitle_keys.push(normalize_key(&html_to_text(html)));
                true
            }
            ContentItem::Paragraph { html } => {
                let key = normalize_key(&html_to_text(html));
                !subtitle_keys.contains(&key)
            }
            _ => true,
        })
        .collect();

    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(src: &str, featured: bool) -> ContentItem {
        ContentItem::Image {
            src: src.to_string(),
            alt: String::new(),
            caption: String::new(),
            is_featured: featured,
        }
    }

    fn paragraph(html: &str) -> ContentItem {
        ContentItem::Paragraph { html: html.to_string() }
    }

    #[test]
    fn featured_image_wins_over_later_copy() {
        let items = vec![
            image("https://example.com/lead.jpg?w=1200", true),
            paragraph("Text."),
            image("https://example.com/lead.jpg?w=600", false),
        ];
        let (kept, removed) = dedup(items, "T");
        assert_eq!(removed, 1);
        assert_eq!(kept[0], image("https://example.com/lead.jpg?w=1200", true));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn paragraph_repeating_subtitle_is_removed() {
        let items = vec![
            ContentItem::Subtitle {
                text: "Council says repairs will take months.".to_string(),
                html: "Council says <em>repairs</em> will take months.".to_string(),
            },
            paragraph("Council says <em>repairs</em> will take months."),
            paragraph("Other text."),
        ];
        let (kept, removed) = dedup(items, "T");
        assert_eq!(removed, 1);
        assert_eq!(kept[1], paragraph("Other text."));
    }

    #[test]
    fn only_first_subtitle_survives() {
        let subtitle = |t: &str| ContentItem::Subtitle { text: t.to_string(), html: t.to_string() };
        let (kept, _) = dedup(vec![subtitle("One deck"), subtitle("Two deck")], "T");
        assert_eq!(kept, vec![subtitle("One deck")]);
    }

    #[test]
    fn other_items_pass_through() {
        let items = vec![
            ContentItem::Quote { html: "q".to_string() },
            ContentItem::Quote { html: "q".to_string() },
            paragraph("Same."),
            paragraph("Same."),
        ];
        let (kept, removed) = dedup(items, "T");
        assert_eq!(removed, 0);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let items = vec![
            image("https://example.com/a.jpg", true),
            ContentItem::Heading { level: 2, text: "Part one".to_string(), id: None },
            image("https://example.com/a.jpg", false),
            ContentItem::Heading { level: 3, text: "part ONE".to_string(), id: None },
        ];
        let (once, _) = dedup(items, "Title");
        let (twice, removed) = dedup(once.clone(), "Title");
        assert_eq!(once, twice);
        assert_eq!(removed, 0);
    }
}
