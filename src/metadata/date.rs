//! Publish date.
//!
//! Output is ISO-8601, full or partial: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
//! Calendar validity is checked with `chrono`.

use chrono::{DateTime, Datelike, NaiveDate};

use crate::dom::{self, Document, NodeRef};
use crate::patterns::{DATE_ONLY_LINE, DATE_SELECTORS, DAY_MONTH_YEAR, ISO_DATE_PREFIX, MONTH_DAY_YEAR, MONTH_YEAR};
use crate::rules::CompiledRules;
use crate::text::char_len;

/// Matches inspected per selector.
const MATCHES_PER_SELECTOR: usize = 3;

/// Text nodes scanned by the fallback.
const FALLBACK_TEXT_NODES: usize = 20;

/// Text nodes longer than this are prose, not a dateline.
const SHORT_TEXT_MAX: usize = 100;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Numeric formats tried after the ISO prefix, month-first like browsers.
const NUMERIC_FORMATS: &[&str] = &["%m/%d/%Y", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d", "%Y.%m.%d"];

/// Find the publish date, or an empty string.
#[must_use]
pub fn extract_publish_date(doc: &Document, rules: &CompiledRules) -> String {
    for selector in DATE_SELECTORS {
        let matches = doc.select(selector);
        for node in matches.nodes().iter().take(MATCHES_PER_SELECTOR) {
            if let Some(date) = raw_date_values(node).iter().find_map(|raw| parse_date(raw, rules)) {
                return date;
            }
        }
    }
    text_fallback(doc, rules).unwrap_or_default()
}

/// Attribute values first, then visible text.
fn raw_date_values(node: &NodeRef) -> Vec<String> {
    let sel = dom::selection(node);
    let mut values: Vec<String> = ["content", "datetime"]
        .iter()
        .filter_map(|attr| dom::non_empty_attribute(&sel, attr))
        .collect();
    if dom::node_tag(node) != "meta" {
        let text = dom::visible_text(node);
        if !text.is_empty() {
            values.push(text);
        }
    }
    values
}

/// Scan the first short text nodes of `<article>` (or `<main>`) for a line
/// that is nothing but a date.
fn text_fallback(doc: &Document, rules: &CompiledRules) -> Option<String> {
    let scope = ["article", "main"]
        .iter()
        .find_map(|tag| doc.select_single(tag).nodes().first().copied())?;

    scope
        .descendants()
        .into_iter()
        .filter(|n| n.is_text())
        .filter(|n| !n.parent().is_some_and(|p| matches!(dom::node_tag(&p).as_str(), "script" | "style")))
        .map(|n| n.text().trim().to_string())
        .filter(|t| !t.is_empty() && char_len(t) <= SHORT_TEXT_MAX)
        .take(FALLBACK_TEXT_NODES)
        .filter(|t| DATE_ONLY_LINE.is_match(t))
        .find_map(|t| parse_date(&t, rules))
}

/// Parse a date string into ISO-8601 (full or partial).
///
/// ```rust
/// use rs_article_heuristics::metadata::date::parse_date;
/// use rs_article_heuristics::rules::DEFAULT_RULES;
///
/// assert_eq!(parse_date("2024-03-15T10:00:00Z", &DEFAULT_RULES).as_deref(), Some("2024-03-15"));
/// assert_eq!(parse_date("15 März 2024", &DEFAULT_RULES).as_deref(), Some("2024-03-15"));
/// assert_eq!(parse_date("March 2024", &DEFAULT_RULES).as_deref(), Some("2024-03"));
/// ```
#[must_use]
pub fn parse_date(raw: &str, rules: &CompiledRules) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    iso_prefix(raw)
        .or_else(|| native(raw))
        .or_else(|| day_month_year(raw, rules))
        .or_else(|| month_day_year(raw, rules))
        .or_else(|| month_year(raw, rules))
}

fn iso_prefix(raw: &str) -> Option<String> {
    let caps = ISO_DATE_PREFIX.captures(raw)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    let month: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
    let day: Option<u32> = caps.get(3).and_then(|d| d.as_str().parse().ok());
    match (month, day) {
        (Some(m), Some(d)) => full_date(year, m, d),
        (Some(m), None) => partial_month(year, m),
        _ => Some(format!("{year:04}")),
    }
}

/// RFC 3339 / RFC 2822 timestamps and numeric day-month-year forms.
fn native(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return full_date(dt.year(), dt.month(), dt.day());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return full_date(dt.year(), dt.month(), dt.day());
    }
    let head = raw.split_whitespace().next().unwrap_or(raw);
    NUMERIC_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
        .and_then(|d| full_date(d.year(), d.month(), d.day()))
}

fn day_month_year(raw: &str, rules: &CompiledRules) -> Option<String> {
    DAY_MONTH_YEAR.captures_iter(raw).find_map(|caps| {
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month = rules.month_number(caps.get(2)?.as_str())?;
        let year: i32 = caps.get(3)?.as_str().parse().ok()?;
        full_date(year, month, day)
    })
}

fn month_day_year(raw: &str, rules: &CompiledRules) -> Option<String> {
    MONTH_DAY_YEAR.captures_iter(raw).find_map(|caps| {
        let month = rules.month_number(caps.get(1)?.as_str())?;
        let day: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year: i32 = caps.get(3)?.as_str().parse().ok()?;
        full_date(year, month, day)
    })
}

fn month_year(raw: &str, rules: &CompiledRules) -> Option<String> {
    MONTH_YEAR.captures_iter(raw).find_map(|caps| {
        let month = rules.month_number(caps.get(1)?.as_str())?;
        let year: i32 = caps.get(2)?.as_str().parse().ok()?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        partial_month(year, month)
    })
}

fn full_date(year: i32, month: u32, day: u32) -> Option<String> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

fn partial_month(year: i32, month: u32) -> Option<String> {
    (1..=12).contains(&month).then(|| format!("{year:04}-{month:02}"))
}
