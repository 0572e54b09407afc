//! URL extraction from free text (SMS bodies, clipboard contents)

use regex::Regex;
use std::sync::LazyLock;

/// First URL-like run in a text: an explicit scheme, a `www.` prefix, or a
/// bare `label.tld` host, followed by any non-whitespace.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((https?://)|(www\.)|(?:[a-z0-9-]+\.)+[a-z]{2,})[^\s]*")
        .expect("Invalid URL pattern regex")
});

/// Extract the first URL-like substring from `text`.
///
/// A match without a scheme gets `https://` prepended. The scheme test is
/// "starts with `http`", case-insensitive, so `HTTP://X.COM` is returned as is.
///
/// Returns `None` when nothing in the text looks like a URL.
pub fn extract_url(text: &str) -> Option<String> {
    URL_PATTERN
        .find(text)
        .map(|m| normalize_scheme(m.as_str()))
}

/// Every URL-like substring in order of appearance, normalized like [`extract_url`].
pub fn extract_all(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| normalize_scheme(m.as_str()))
        .collect()
}

/// Whether a decoded payload (e.g. from a QR code) is a web address we can scan.
pub fn looks_like_web_url(payload: &str) -> bool {
    starts_with_http(payload.trim())
}

fn normalize_scheme(candidate: &str) -> String {
    if starts_with_http(candidate) {
        candidate.to_string()
    } else {
        format!("https://{candidate}")
    }
}

fn starts_with_http(s: &str) -> bool {
    s.get(..4)
        .map(|p| p.eq_ignore_ascii_case("http"))
        .unwrap_or(false)
}
