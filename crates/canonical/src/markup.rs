//! Markup and citation cleanup applied before sentence splitting.
//!
//! This is deliberately not an HTML parser. Pages are expected to have been
//! reduced to their main content upstream; what remains here is removing the
//! leftover tags, decoding the handful of entities that survive extraction,
//! and dropping reference markers that would otherwise glue themselves onto
//! sentence ends.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::whitespace::collapse_whitespace;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static NUMERIC_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("valid numeric reference regex"));

static EDITORIAL_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(?:citation needed|edit)\]").expect("valid editorial marker regex")
});

/// Entities decoded by [`normalize_markup`]. `&amp;` is last so that an
/// escaped entity such as `&amp;lt;` decodes once, to `&lt;`.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Strips tags, decodes common entities and collapses whitespace.
///
/// Every tag is replaced by a space so that block boundaries such as
/// `</p><p>` do not fuse two words together.
///
/// ```rust
/// use canonical::normalize_markup;
///
/// let text = normalize_markup("<p>Fish &amp; chips</p><p>are&nbsp;tasty.</p>");
/// assert_eq!(text, "Fish & chips are tasty.");
/// ```
pub fn normalize_markup(html: &str) -> String {
    let mut text = TAG_RE.replace_all(html, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    collapse_whitespace(&text)
}

/// Removes `[12]`-style citation markers and the `[citation needed]` and
/// `[edit]` annotations (case-insensitive).
///
/// Whitespace is left as found; callers collapse it afterwards.
pub fn strip_reference_markers(text: &str) -> String {
    let without_numeric = NUMERIC_REF_RE.replace_all(text, "");
    EDITORIAL_REF_RE
        .replace_all(&without_numeric, "")
        .into_owned()
}
