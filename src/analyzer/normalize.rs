//! Message text normalization.
//!
//! Strips mentions, URLs and stray punctuation so that the remaining words
//! can be scored or counted. Operates on raw bodies as well as on sanitized
//! CSV fields, which is why escaped `\n` / `\t` sequences are handled too.

use once_cell::sync::Lazy;
use regex::Regex;

/// Mentions, a non-word character directly followed by a space, and URLs.
///
/// The alternatives are tried in this order at each position.
static NOISE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(@[A-Za-z0-9]+)|([^0-9A-Za-z \t]) |(\w+://\S+)").expect("noise pattern is valid")
});

/// Normalizes a message for scoring and word counting.
///
/// Applies [`normalize_once`] until the text stops changing. A single pass
/// can expose new matches (`"a!! b"` leaves `"a! b"`), so iterating keeps
/// the result stable under repeated normalization.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One normalization pass.
///
/// 1. Mentions, URLs and punctuation-before-space become a space
/// 2. Literal `\n` becomes a space, literal `\t` is removed
/// 3. Whitespace runs collapse to one space, ends are trimmed
pub fn normalize_once(raw: &str) -> String {
    let stripped = NOISE_RE.replace_all(raw, " ");
    let unescaped = stripped.replace("\\n", " ").replace("\\t", "");
    unescaped.split_whitespace().collect::<Vec<_>>().join(" ")
}
