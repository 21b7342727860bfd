use rs_article_heuristics::{extract, extract_document, extract_with_options, ContentItem, FallbackTier, Options};

const STORY: &str = r#"
<html>
  <head>
    <title>Storm closes bridge | Daily Post</title>
    <meta name="author" content="Jane Porter">
    <meta property="article:published_time" content="2024-03-05T09:30:00Z">
  </head>
  <body>
    <nav class="site-nav"><ul><li><a href="/">Home</a></li><li><a href="/news">News</a></li></ul></nav>
    <article class="story">
      <h1>Storm closes bridge</h1>
      <p>The river rose overnight, and the council closed the old bridge to traffic until engineers could inspect the damaged piers.</p>
      <h2 id="next">What happens next</h2>
      <p>Buses will be diverted through the north estate, adding around twenty minutes to most journeys into the town centre.</p>
      <blockquote><p>We will not take any chances with public safety.</p></blockquote>
      <ul><li>Route 4 diverted</li><li>Route 7 suspended</li></ul>
      <pre><code class="language-python">print("levels")</code></pre>
    </article>
    <footer class="site-footer"><p>Copyright 2024 Daily Post</p></footer>
  </body>
</html>
"#;

fn kinds(items: &[ContentItem]) -> Vec<&'static str> {
    items.iter().map(ContentItem::kind).collect()
}

#[test]
fn full_article_fields() {
    let result = extract(STORY);
    assert!(!result.is_error(), "unexpected error: {:?}", result.error);
    assert_eq!(result.title, "Storm closes bridge");
    assert_eq!(result.author, "Jane Porter");
    assert_eq!(result.publish_date, "2024-03-05");
}

#[test]
fn full_article_items_in_document_order() {
    let result = extract(STORY);
    assert_eq!(
        kinds(&result.content),
        vec!["paragraph", "heading", "paragraph", "quote", "list", "code"]
    );

    let Some(ContentItem::Paragraph { html }) = result.content.first() else {
        panic!("expected a leading paragraph, got {:?}", result.content.first());
    };
    assert!(html.starts_with("The river rose overnight"));

    assert_eq!(
        result.content[1],
        ContentItem::Heading {
            level: 2,
            text: "What happens next".to_string(),
            id: Some("next".to_string()),
        }
    );
    assert_eq!(
        result.content[4],
        ContentItem::List {
            ordered: false,
            items: vec!["Route 4 diverted".to_string(), "Route 7 suspended".to_string()],
        }
    );
    let ContentItem::Code { language, text } = &result.content[5] else {
        panic!("expected code, got {:?}", result.content[5]);
    };
    assert_eq!(language, "python");
    assert!(text.contains("print"));
}

#[test]
fn page_chrome_outside_article_is_ignored() {
    let result = extract(STORY);
    let json = result.to_json().unwrap_or_default();
    assert!(!json.contains("Copyright 2024"));
    assert!(!json.contains("Home"));
}

#[test]
fn duplicate_title_heading_scenario() {
    let html = "<article><h1>My Title</h1><p>Intro.</p><h2>My Title</h2><p>Body.</p></article>";
    let result = extract(html);
    assert_eq!(result.title, "My Title");
    assert_eq!(
        result.content,
        vec![
            ContentItem::Paragraph { html: "Intro.".to_string() },
            ContentItem::Paragraph { html: "Body.".to_string() },
        ]
    );
}

#[test]
fn thin_article_reports_lenient_tier() {
    let html = "<article><h1>My Title</h1><p>Intro.</p><p>Body.</p></article>";
    let options = Options {
        debug: true,
        ..Options::default()
    };
    let result = extract_with_options(html, &options);
    let Some(info) = result.debug_info else {
        panic!("debug info missing");
    };
    assert_eq!(info.fallback, FallbackTier::Lenient);
    assert_eq!(info.container_tag.as_deref(), Some("article"));
}

#[test]
fn page_without_landmarks_finds_paragraph_block() {
    let sentence = "Residents along the river spent the night moving furniture upstairs and filling sandbags while the council opened shelters. ";
    let html = format!(
        r#"<html><body><div id="menu-strip"><p>Short.</p></div><div id="story-body"><p>{s}</p><p>{s}</p><p>{s}</p><p>{s}</p></div></body></html>"#,
        s = sentence.repeat(2)
    );
    let options = Options {
        debug: true,
        ..Options::default()
    };
    let result = extract_with_options(&html, &options);
    assert_eq!(result.content.len(), 4);
    assert!(result.content.iter().all(|i| i.kind() == "paragraph"));
    let Some(info) = result.debug_info else {
        panic!("debug info missing");
    };
    assert_eq!(info.container_id.as_deref(), Some("story-body"));
}

#[test]
fn tables_follow_the_option() {
    let html = r#"<article><h1>Water levels by town</h1>
        <p>The river authority published readings from its gauges along the valley on Tuesday morning after the storm.</p>
        <table><tr><th>Town</th><th>Level</th></tr><tr><td>Ashby</td><td>4.2m</td></tr></table></article>"#;
    let with = extract(html);
    assert!(with.content.iter().any(|i| i.kind() == "table"));

    let options = Options {
        include_tables: false,
        ..Options::default()
    };
    let without = extract_with_options(html, &options);
    assert!(without.content.iter().all(|i| i.kind() != "table"));
}

#[test]
fn standfirst_is_inserted_once_after_title() {
    let html = r#"<article><h1>Storm closes bridge</h1>
        <p class="standfirst">Council says repairs to the old crossing will take months.</p>
        <p>The river rose overnight, and the council closed the old bridge to traffic until engineers could inspect the damaged piers.</p></article>"#;
    let result = extract(html);
    assert_eq!(
        result.content.first(),
        Some(&ContentItem::Subtitle {
            text: "Council says repairs to the old crossing will take months.".to_string(),
            html: "Council says repairs to the old crossing will take months.".to_string(),
        })
    );
    assert_eq!(result.content.iter().filter(|i| i.kind() == "subtitle").count(), 1);
    assert_eq!(result.content.len(), 2);
}

#[test]
fn lone_intro_paragraph_does_not_let_newsletter_back_in() {
    let html = r#"<article><h1>A headline</h1>
        <p>Real body paragraph with enough text to matter here, honestly.</p>
        <div class="newsletter"><input type="email"><p>Get the latest news in your inbox</p></div></article>"#;
    let options = Options {
        debug: true,
        ..Options::default()
    };
    let result = extract_with_options(html, &options);
    assert_eq!(kinds(&result.content), vec!["subtitle"]);
    let json = serde_json::to_string(&result.content).unwrap_or_default();
    assert!(!json.contains("Get the latest news"), "{json}");
    let Some(info) = result.debug_info else {
        panic!("debug info missing");
    };
    assert_eq!(info.fallback, FallbackTier::None);
}

#[test]
fn standfirst_can_be_disabled() {
    let html = r#"<article><h1>Storm closes bridge</h1>
        <p class="standfirst">Council says repairs to the old crossing will take months.</p></article>"#;
    let options = Options {
        standfirst: false,
        ..Options::default()
    };
    let result = extract_with_options(html, &options);
    assert!(result.content.iter().all(|i| i.kind() != "subtitle"));
}

#[test]
fn pre_parsed_document_gives_same_result() {
    let doc = rs_article_heuristics::dom::parse(STORY);
    let from_doc = extract_document(&doc, &Options::default());
    let from_str = extract(STORY);
    assert_eq!(from_doc.content, from_str.content);
    assert_eq!(from_doc.title, from_str.title);
}

#[test]
fn json_uses_camel_case_contract() {
    let options = Options {
        debug: true,
        ..Options::default()
    };
    let result = extract_with_options(STORY, &options);
    let json = result.to_json().unwrap_or_default();
    assert!(json.contains(r#""publishDate":"2024-03-05""#));
    assert!(json.contains(r#""type":"paragraph""#));
    assert!(json.contains(r#""debugInfo""#));
    assert!(!json.contains(r#""error""#));
}
