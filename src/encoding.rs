//! Byte input decoding.
//!
//! A byte-order mark wins; otherwise the first 1024 bytes are scanned for a
//! `<meta charset>` or `http-equiv="Content-Type"` declaration. Anything
//! undeclared or unknown is read as UTF-8. Decoding is lossy: invalid
//! sequences become U+FFFD instead of failing the extraction.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes scanned for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset=...>` and `<meta http-equiv=content-type content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\b[^>]*?(?:\bcharset\s*=\s*["']?|\bcontent\s*=\s*["'][^"'>]*;\s*charset\s*=\s*)([\w:.-]+)"#,
    )
    .expect("META_CHARSET regex")
});

/// Charset label declared in the document head, if any.
#[must_use]
pub fn declared_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LEN)]);
    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Encoding to decode `bytes` with: BOM, then declaration, then UTF-8.
#[must_use]
pub fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    declared_charset(bytes)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a string.
///
/// ```rust
/// use rs_article_heuristics::encoding::decode_html;
///
/// let html = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(bytes: &[u8]) -> String {
    let encoding = sniff_encoding(bytes);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
