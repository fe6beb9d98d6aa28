//! Plain-text sanitization for request-supplied language values.
//!
//! Values coming from query parameters and headers are reduced to a safe
//! plain-text form before anything treats them as a language code or locale.

use regex::Regex;
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Reduce `input` to plain text.
///
/// - markup tags (`<b>`, `</script>`, `<img src=x>`) are removed
/// - a stray `<` with no closing `>` drops everything after it
/// - control characters become spaces
/// - runs of whitespace collapse to one space
/// - the result is trimmed
///
/// # Example
/// ```
/// use catalog_translations::i18n::sanitize_text;
///
/// assert_eq!(sanitize_text("  <b>fr</b>\n"), "fr");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let tag_regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    let whitespace_regex = WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap());

    let without_tags = tag_regex.replace_all(input, "");
    let without_stray = match without_tags.find('<') {
        Some(pos) => &without_tags[..pos],
        None => &without_tags[..],
    };

    let printable: String = without_stray
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    whitespace_regex
        .replace_all(&printable, " ")
        .trim()
        .to_string()
}
