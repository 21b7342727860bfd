use rs_article_heuristics::{extract, extract_with_options, Options};

const BODY_ONE: &str = "The river rose overnight, and the council closed the old bridge to traffic until engineers could inspect the damaged piers along the eastern bank.";
const BODY_TWO: &str = "Buses will be diverted through the north estate, adding around twenty minutes to most journeys into the town centre during the morning rush.";

/// Content of an article with two real paragraphs around `inner`, as JSON.
fn article_json(inner: &str) -> String {
    let html = format!(
        "<html><head><title>Storm closes bridge</title></head><body><article><h1>Storm closes bridge</h1><p>{BODY_ONE}</p>{inner}<p>{BODY_TWO}</p></article></body></html>"
    );
    let result = extract(&html);
    assert!(!result.is_error(), "unexpected error: {:?}", result.error);
    let json = serde_json::to_string(&result.content).unwrap_or_default();
    assert!(json.contains("The river rose overnight"), "body lost: {json}");
    assert!(json.contains("Buses will be diverted"), "body lost: {json}");
    json
}

#[test]
fn share_buttons_inside_article_are_excluded() {
    let json = article_json(r#"<div class="share-buttons"><p>SHARE_BLOCK</p></div>"#);
    assert!(!json.contains("SHARE_BLOCK"));
}

#[test]
fn newsletter_form_is_fully_excluded() {
    let json = article_json(
        r#"<div class="newsletter"><input type="email"><p>Get the latest news in your inbox</p></div>"#,
    );
    assert!(!json.contains("latest news"));
}

#[test]
fn unclassed_signup_form_is_excluded() {
    let json = article_json(
        r#"<form><p>Sign up for our newsletter</p><input type="email" name="email"><button>Go</button></form>"#,
    );
    assert!(!json.contains("Sign up"));
}

#[test]
fn hidden_paragraph_is_excluded() {
    let json = article_json(r#"<p style="display: none">HIDDEN_TEXT</p>"#);
    assert!(!json.contains("HIDDEN_TEXT"));
}

#[test]
fn aside_inside_article_is_excluded() {
    let json = article_json("<aside><p>ASIDE_TEXT</p></aside>");
    assert!(!json.contains("ASIDE_TEXT"));
}

#[test]
fn related_block_is_excluded_as_a_whole() {
    let json = article_json(
        r#"<div><h3>Related posts</h3><ul><li><a href="/a">RELATED_ONE</a></li><li><a href="/b">RELATED_TWO</a></li></ul></div>"#,
    );
    assert!(!json.contains("Related posts"));
    assert!(!json.contains("RELATED_ONE"));
}

#[test]
fn read_more_prompt_is_excluded() {
    let json = article_json(r#"<p><a href="/next">Read more</a></p>"#);
    assert!(!json.contains("Read more"));
}

#[test]
fn paywall_prompt_is_excluded() {
    let json = article_json("<p>This article is for subscribers only.</p>");
    assert!(!json.contains("subscribers only"));
}

#[test]
fn localized_navigation_phrases_are_excluded() {
    let json = article_json("<p>Lire la suite</p><p>Weiterlesen</p><p>Leer más</p>");
    assert!(!json.contains("Lire la suite"));
    assert!(!json.contains("Weiterlesen"));
    assert!(!json.contains("Leer más"));
}

#[test]
fn byline_and_word_count_lines_are_excluded() {
    let json = article_json("<p>By Jane Porter</p><p>1,250 words</p><p>Edited by Sam Field</p>");
    assert!(!json.contains("Jane Porter"));
    assert!(!json.contains("1,250 words"));
    assert!(!json.contains("Sam Field"));
}

#[test]
fn ad_container_is_excluded() {
    let json = article_json(r#"<div class="ad-slot"><div><p>AD_COPY</p></div></div>"#);
    assert!(!json.contains("AD_COPY"));
}

#[test]
fn comments_section_is_excluded() {
    let json = article_json(r#"<section id="comments"><h2>COMMENTS_HEADING</h2><p>COMMENT_TEXT</p></section>"#);
    assert!(!json.contains("COMMENT_TEXT"));
    assert!(!json.contains("COMMENTS_HEADING"));
}

#[test]
fn boilerplate_headings_are_excluded() {
    let json = article_json("<h2>Tags</h2><h2>You may also like</h2>");
    assert!(!json.contains(r#""text":"Tags""#));
    assert!(!json.contains("You may also like"));
}

#[test]
fn long_paragraph_with_navigation_words_is_kept() {
    let long = format!("Related to the closure, {BODY_ONE} {BODY_TWO}");
    let html = format!("<article><h1>Storm closes bridge</h1><p>{long}</p></article>");
    let json = serde_json::to_string(&extract(&html).content).unwrap_or_default();
    assert!(json.contains("Related to the closure"));
}

#[test]
fn exclusions_are_counted_in_debug_mode() {
    let html = format!(
        r#"<article><h1>Storm closes bridge</h1><p>{BODY_ONE}</p><div class="share-buttons"><p>Share</p></div><p style="display:none">x</p><p>{BODY_TWO}</p></article>"#
    );
    let options = Options {
        debug: true,
        ..Options::default()
    };
    let result = extract_with_options(&html, &options);
    let Some(info) = result.debug_info else {
        panic!("debug info missing");
    };
    assert!(info.nodes_excluded >= 2);
    assert_eq!(info.exclusion_reasons.get("hidden"), Some(&1));
    assert_eq!(info.exclusion_reasons.get("ancestor_class"), Some(&1));
    assert_eq!(result.content.len(), 2);
}
