use std::sync::Arc;

use rs_article_heuristics::{extract, extract_bytes, extract_with_options, Error, Options, RuleTables};

const PROSE: &str = "The river rose overnight, and the council closed the old bridge to traffic until engineers could inspect the damaged piers along the eastern bank.";

#[test]
fn empty_and_garbage_input_never_errors() {
    for html in ["", "   ", "<", "</p></div></body>", "<<<>>>&&&", "<html><head></head></html>"] {
        let result = extract(html);
        assert!(!result.is_error(), "{html:?} -> {:?}", result.error);
        assert!(result.content.is_empty());
    }
}

#[test]
fn binary_bytes_are_decoded_lossily() {
    let bytes: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    let result = extract_bytes(&bytes, &Options::default());
    assert!(!result.is_error());
}

#[test]
fn very_deep_nesting_terminates() {
    let depth = 1_000;
    let html = format!(
        "<article>{}<p>{PROSE}</p>{}</article>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    let result = extract(&html);
    assert!(!result.is_error());
}

#[test]
fn deep_wrappers_without_landmarks_are_scanned() {
    let depth = 1_000;
    let html = format!(
        "<body>{}<p>{PROSE}</p><p>{PROSE}</p>{}</body>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    let result = extract(&html);
    assert!(!result.is_error());
    assert_eq!(result.content.len(), 2);
}

#[test]
fn wide_documents_are_handled() {
    let body: String = (0..2_000).map(|i| format!("<p>Paragraph {i}. {PROSE}</p>")).collect();
    let result = extract(&format!("<article><h1>Long read</h1>{body}</article>"));
    assert_eq!(result.content.len(), 2_000);
}

#[test]
fn unclosed_and_misnested_tags() {
    let html = format!("<article><h1>Storm closes bridge</h1><p>{PROSE}<p><b><i>{PROSE}</b></i><ul><li>One<li>Two</article>");
    let result = extract(&html);
    assert!(!result.is_error());
    assert_eq!(result.title, "Storm closes bridge");
}

#[test]
fn zero_hop_cap_is_an_error_result() {
    let options = Options {
        max_ancestor_hops: 0,
        ..Options::default()
    };
    let result = extract_with_options("<head><title>Storm</title></head><article><p>x</p></article>", &options);
    assert!(result.is_error());
    assert_eq!(result.title, "Storm");
    assert!(result.content.is_empty());
    assert!(result.error_stack.as_deref().is_some_and(|s| s.contains("ExtractionError")));
}

#[test]
fn small_hop_cap_still_extracts() {
    let options = Options {
        max_ancestor_hops: 1,
        ..Options::default()
    };
    let result = extract_with_options(&format!("<article><p>{PROSE}</p></article>"), &options);
    assert_eq!(result.content.len(), 1);
}

#[test]
fn custom_rule_tables_are_honored() {
    let Ok(tables) = RuleTables::from_json(r#"{"excluded_class_tokens": ["partner-box"]}"#) else {
        panic!("rule table should parse");
    };
    let Ok(rules) = tables.compile() else {
        panic!("rule table should compile");
    };
    let html = format!(r#"<article><p>{PROSE}</p><div class="partner-box"><p>PARTNER_COPY</p></div><p>{PROSE} More.</p></article>"#);

    let options = Options {
        rules: Some(Arc::new(rules)),
        ..Options::default()
    };
    let custom = serde_json::to_string(&extract_with_options(&html, &options).content).unwrap_or_default();
    assert!(!custom.contains("PARTNER_COPY"));

    let default = serde_json::to_string(&extract(&html).content).unwrap_or_default();
    assert!(default.contains("PARTNER_COPY"));
}

#[test]
fn invalid_rule_pattern_is_reported() {
    let Ok(tables) = RuleTables::from_json(r#"{"navigation_patterns": ["(unclosed"]}"#) else {
        panic!("rule table should parse");
    };
    assert!(matches!(tables.compile(), Err(Error::InvalidRule { .. })));
}

#[test]
fn malformed_rule_json_is_reported() {
    assert!(matches!(RuleTables::from_json("{not json"), Err(Error::InvalidRuleTable(_))));
}

#[test]
fn input_document_is_not_modified() {
    let doc = rs_article_heuristics::dom::parse(&format!(
        r##"<article><p onclick="x()" style="color:red">{PROSE}<sup><a href="#fn1">1</a></sup></p></article>"##
    ));
    let before = doc.html().to_string();
    let _ = rs_article_heuristics::extract_document(&doc, &Options::default());
    assert_eq!(doc.html().to_string(), before);
}
