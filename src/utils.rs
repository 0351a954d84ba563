//! Common text utilities
//!
//! Pure helpers shared by the resolver, the row-table parser and the rank
//! engine: label normalization, numeric coercion, entity decoding and tag
//! stripping. No I/O happens here.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?").unwrap()
});

/// Lowercase, collapse whitespace runs to one space, trim.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&s.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Collapse whitespace (non-breaking spaces included) and trim, keeping case.
pub fn text_cleanup(s: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&s.replace('\u{00A0}', " "), " ")
        .trim()
        .to_string()
}

/// Coerce a percentage-like string to a finite number.
///
/// Strips `%`, `,` and `+`, trims, then reads the longest leading decimal
/// literal. Returns `None` for anything without one, or for non-finite results.
/// Never panics.
pub fn to_number(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| !matches!(c, '%' | ',' | '+')).collect();
    let literal = LEADING_DECIMAL.find(cleaned.trim())?;
    literal
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Decode the handful of entities the upstream pages actually emit.
///
/// Covers `&amp; &lt; &gt; &quot; &#39;` only; any other entity (`&nbsp;`,
/// numeric forms other than `&#39;`) is left in the text as written.
pub fn decode_html_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Remove every `<...>` tag, leaving the text content untouched.
pub fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}
