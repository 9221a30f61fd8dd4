//! Slug generation for user permalinks.
//!
//! Slugs are lowercase ASCII letters and digits separated by single hyphens.
//! Input is transliterated to ASCII first, so Cyrillic, Greek and CJK
//! usernames keep a readable slug. Characters with no transliteration are
//! dropped.

use deunicode::deunicode_with_tofu;

/// Derive a URL-safe slug from `value`.
///
/// The result may be empty when `value` has no alphanumeric content.
///
/// # Examples
/// ```
/// use user_service::domain::slugify;
///
/// assert_eq!(slugify("jane_doe"), "jane-doe");
/// assert_eq!(slugify("  Zoë O'Neil "), "zoe-o-neil");
/// assert_eq!(slugify("Иван Петров"), "ivan-petrov");
/// ```
#[must_use]
pub fn slugify(value: &str) -> String {
    let ascii = deunicode_with_tofu(value, "");
    let mut out = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for ch in ascii.chars().map(|ch| ch.to_ascii_lowercase()) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    out
}
