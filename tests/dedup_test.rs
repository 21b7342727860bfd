use rs_article_heuristics::dedup::dedup;
use rs_article_heuristics::{extract, ContentItem};

fn heading(text: &str) -> ContentItem {
    ContentItem::Heading { level: 2, text: text.to_string(), id: None }
}

fn image(src: &str) -> ContentItem {
    ContentItem::Image {
        src: src.to_string(),
        alt: String::new(),
        caption: String::new(),
        is_featured: false,
    }
}

#[test]
fn headings_compare_case_and_marker_insensitively() {
    let items = vec![heading("Background"), heading("  BACKGROUND \u{FFFC}"), heading("Background [OBJ]")];
    let (kept, removed) = dedup(items, "Storm closes bridge");
    assert_eq!(kept, vec![heading("Background")]);
    assert_eq!(removed, 2);
}

#[test]
fn title_echo_is_removed() {
    let (kept, _) = dedup(vec![heading("storm CLOSES bridge"), heading("Next steps")], "Storm closes bridge");
    assert_eq!(kept, vec![heading("Next steps")]);
}

#[test]
fn image_urls_compare_by_origin_and_path() {
    let items = vec![
        image("https://example.com/a.jpg?w=100"),
        image("https://example.com/a.jpg#top"),
        image("https://cdn.example.com/a.jpg"),
        image("https://example.com/b.jpg"),
    ];
    let (kept, removed) = dedup(items, "");
    assert_eq!(removed, 1);
    assert_eq!(
        kept.iter().filter_map(ContentItem::image_src).collect::<Vec<_>>(),
        vec!["https://example.com/a.jpg?w=100", "https://cdn.example.com/a.jpg", "https://example.com/b.jpg"]
    );
}

#[test]
fn empty_title_removes_nothing_by_itself() {
    let (kept, removed) = dedup(vec![heading("Intro")], "");
    assert_eq!(kept.len(), 1);
    assert_eq!(removed, 0);
}

#[test]
fn extraction_output_is_already_deduplicated() {
    let html = r#"<html><head><meta property="og:image" content="https://example.com/lead.jpg"></head><body>
        <article><h1>Storm closes bridge</h1>
        <p>The river rose overnight, and the council closed the old bridge to traffic until engineers could inspect it.</p>
        <img src="https://example.com/lead.jpg?size=large">
        <h2>Background</h2><p>Text one.</p><h2>Background</h2><p>Text two.</p>
        </article></body></html>"#;
    let result = extract(html);
    let (again, removed) = dedup(result.content.clone(), &result.title);
    assert_eq!(again, result.content);
    assert_eq!(removed, 0);
    assert_eq!(result.images().count(), 1);
    assert_eq!(result.content.iter().filter(|i| i.heading_text() == Some("Background")).count(), 1);
}
