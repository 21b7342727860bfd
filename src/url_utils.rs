//! URL utility functions.
//!
//! Absolute-URL checks, resolution against a base, the origin+path key used
//! to deduplicate images, image-file detection and author slug extraction.

use url::Url;

use crate::patterns::IMAGE_EXTENSION;

/// Parse a string as an absolute `http(s)` URL with a host.
///
/// # Returns
/// * The parsed URL, or `None` when the string is relative or invalid
#[must_use]
pub fn is_absolute_url(s: &str) -> Option<Url> {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Resolve a possibly-relative URL against `base`.
///
/// `data:` URLs pass through unchanged. Protocol-relative URLs (`//cdn/x.jpg`)
/// take the base scheme, or `https` without a base.
///
/// # Returns
/// * The absolute URL, or `None` when it cannot be made absolute
#[must_use]
pub fn resolve_url(url_str: &str, base: Option<&Url>) -> Option<String> {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return None;
    }

    let lower = url_str.to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("about:") {
        return None;
    }
    if lower.starts_with("data:") {
        return Some(url_str.to_string());
    }

    if let Some(url) = is_absolute_url(url_str) {
        return Some(url.to_string());
    }

    if let Some(rest) = url_str.strip_prefix("//") {
        let scheme = base.map_or("https", Url::scheme);
        return is_absolute_url(&format!("{scheme}://{rest}")).map(|u| u.to_string());
    }

    let base = base?;
    base.join(url_str)
        .ok()
        .filter(|url| url.host().is_some())
        .map(|url| url.to_string())
}

/// Resolve a link `href` for inline HTML. Relative links stay relative when
/// there is no base; `javascript:` links are dropped.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    if href.starts_with('#') {
        return Some(href.to_string());
    }
    resolve_url(href, base).or_else(|| Some(href.to_string()))
}

/// Normalized key for image dedup: origin plus path, query and fragment dropped.
///
/// ```rust
/// use rs_article_heuristics::url_utils::image_key;
///
/// assert_eq!(
///     image_key("https://CDN.example.com/img/a.jpg?w=800#x"),
///     image_key("https://cdn.example.com/img/a.jpg?w=300"),
/// );
/// ```
#[must_use]
pub fn image_key(url_str: &str) -> String {
    let trimmed = url_str.trim();
    match Url::parse(trimmed) {
        Ok(url) if url.host().is_some() => {
            let mut key = url.origin().ascii_serialization();
            key.push_str(url.path());
            key
        }
        _ => {
            let without_query = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
            without_query.to_string()
        }
    }
}

/// Whether the URL path ends in an image file extension.
#[must_use]
pub fn is_image_url(url_str: &str) -> bool {
    IMAGE_EXTENSION.is_match(url_str.trim())
}

/// Last non-empty path segment of a URL or path, file extension removed.
///
/// ```rust
/// use rs_article_heuristics::url_utils::url_slug;
///
/// assert_eq!(url_slug("https://example.com/author/jane-doe/"), Some("jane-doe".to_string()));
/// assert_eq!(url_slug("/people/jdoe.html"), Some("jdoe".to_string()));
/// ```
#[must_use]
pub fn url_slug(url_str: &str) -> Option<String> {
    let path = match Url::parse(url_str.trim()) {
        Ok(url) => url.path().to_string(),
        Err(_) => url_str
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segment = path.split('/').rev().find(|s| !s.trim().is_empty())?;
    let stem = segment.split('.').next().unwrap_or(segment);
    let decoded = stem.replace("%20", " ");
    if decoded.trim().is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Whether a string looks like a URL or URL path rather than display text.
#[must_use]
pub fn looks_like_url(s: &str) -> bool {
    let s = s.trim();
    s.starts_with("http://")
        || s.starts_with("https://")
        || s.starts_with("//")
        || (s.starts_with('/') && !s.contains(' '))
        || (s.starts_with("www.") && !s.contains(' '))
}
