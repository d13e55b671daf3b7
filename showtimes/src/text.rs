//! Accent and case insensitive text matching for search.
//!
//! Only search uses this. Status values and other exact comparisons never go
//! through [`normalize`].

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-cases, decomposes (NFD) and strips combining marks
///
/// `đ`/`Đ` carry a stroke rather than a combining mark, so NFD leaves them
/// intact; they are mapped to `d` explicitly. The result is idempotent:
/// `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect()
}

/// Whether `needle` occurs in `haystack` after normalizing both
#[must_use]
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}
