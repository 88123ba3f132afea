//! Whitespace normalization.
//!
//! Uses Unicode's definition of whitespace (`char::is_whitespace`), so
//! tabs, newlines, carriage returns and non-breaking spaces all count.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
//! ```

/// Collapses runs of whitespace into single ASCII spaces and trims both
/// ends. Whitespace-only input yields an empty string.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
