//! Text normalization for extracted fragments
//!
//! Every piece of text that ends up in a digest goes through [`normalize`]:
//! markup noise is dropped, whitespace runs collapse to one ASCII space and
//! the ends are trimmed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters kept besides letters, digits and whitespace.
pub const KEPT_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '-'];

// Anything that is not alphanumeric, whitespace, or kept punctuation
static RE_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{N}\s.,;:!?()\-]").expect("regex is compile-time constant")
});

/// Normalize a raw text fragment.
///
/// Noise characters are removed before whitespace is collapsed, so removing
/// a symbol between two spaces never leaves a double space behind. This
/// makes the function idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```rust
/// use jats_digest_backend::normalize;
///
/// assert_eq!(normalize("  Foo \n\t Bar  "), "Foo Bar");
/// assert_eq!(normalize("p < 0.05 & n = 12"), "p 0.05 n 12");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let cleaned = RE_NOISE.replace_all(raw, "");
    collapse_whitespace(&cleaned)
}

/// Collapse whitespace runs into one ASCII space and trim both ends.
fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
