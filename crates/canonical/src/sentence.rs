use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::SplitConfig;
use crate::error::CanonicalError;
use crate::markup::{normalize_markup, strip_reference_markers};
use crate::whitespace::collapse_whitespace;

/// Main entry point. Runs the cleanup passes enabled in `cfg` over `input`
/// and returns the ordered sentence list.
///
/// An input with no qualifying sentence returns `Ok(vec![])`.
pub fn extract_sentences(input: &str, cfg: &SplitConfig) -> Result<Vec<String>, CanonicalError> {
    cfg.validate()?;

    // NFKC first, since it can change what the later passes see.
    let text: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut text = if cfg.strip_markup {
        normalize_markup(&text)
    } else {
        collapse_whitespace(&text)
    };

    if cfg.strip_reference_markers {
        text = collapse_whitespace(&strip_reference_markers(&text));
    }

    Ok(split_sentences(&text, cfg))
}

/// Splits `text` at sentence boundaries.
///
/// A boundary is a `.`, `!` or `?` followed by at least one whitespace
/// character and then an uppercase letter. The terminator stays with the
/// sentence it ends; the whitespace is dropped. Fragments are trimmed and
/// kept only when longer than `cfg.min_sentence_chars` characters.
///
/// ```rust
/// use canonical::{split_sentences, SplitConfig};
///
/// let sentences = split_sentences(
///     "The sky is blue. Water boils at 100 degrees. Ok.",
///     &SplitConfig::default(),
/// );
/// assert_eq!(sentences, vec!["The sky is blue.", "Water boils at 100 degrees."]);
/// ```
pub fn split_sentences(text: &str, cfg: &SplitConfig) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if is_terminator(chars[i].1) {
            let mut next = i + 1;
            while next < chars.len() && chars[next].1.is_whitespace() {
                next += 1;
            }
            let has_gap = next > i + 1;
            if has_gap && next < chars.len() && chars[next].1.is_uppercase() {
                let end = chars[i + 1].0;
                push_fragment(&text[start..end], cfg, &mut sentences);
                start = chars[next].0;
                i = next;
                continue;
            }
        }
        i += 1;
    }

    push_fragment(&text[start..], cfg, &mut sentences);
    sentences
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn push_fragment(fragment: &str, cfg: &SplitConfig, out: &mut Vec<String>) {
    let trimmed = fragment.trim();
    if trimmed.chars().count() > cfg.min_sentence_chars {
        out.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> SplitConfig {
        SplitConfig {
            strip_markup: false,
            strip_reference_markers: false,
            ..Default::default()
        }
    }

    #[test]
    fn splits_on_terminators_before_uppercase() {
        let out = split_sentences("Hello there world. Next sentence here! Is it? Yes indeed it is.", &plain());
        assert_eq!(
            out,
            vec!["Hello there world.", "Next sentence here!", "Yes indeed it is."]
        );
    }

    #[test]
    fn no_split_before_lowercase_or_digit() {
        let out = split_sentences("Version 2.0 ships today. it was e.g. 3. Done and dusted.", &plain());
        assert_eq!(
            out,
            vec!["Version 2.0 ships today. it was e.g. 3.", "Done and dusted."]
        );
    }

    #[test]
    fn no_split_without_whitespace() {
        let out = split_sentences("See example.Com for more details.", &plain());
        assert_eq!(out, vec!["See example.Com for more details."]);
    }

    #[test]
    fn short_fragments_dropped() {
        // "Tiny one." is 9 chars, "Exactly10." is 10: both are filtered.
        let out = split_sentences("Tiny one. Exactly10. This one survives.", &plain());
        assert_eq!(out, vec!["This one survives."]);
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        let cfg = SplitConfig {
            min_sentence_chars: 5,
            ..plain()
        };
        // Six characters, but twelve bytes.
        let out = split_sentences("éééééé", &cfg);
        assert_eq!(out, vec!["éééééé"]);
    }

    #[test]
    fn empty_and_whitespace_inputs_yield_nothing() {
        assert!(split_sentences("", &plain()).is_empty());
        assert!(split_sentences("   ", &plain()).is_empty());
    }

    #[test]
    fn extract_cleans_markup_and_references() {
        let html = "<p>The Eiffel Tower is in Paris.[1]</p>\n<p>It was built in 1889.[citation needed] </p>";
        let out = extract_sentences(html, &SplitConfig::default()).unwrap();
        assert_eq!(out, vec!["The Eiffel Tower is in Paris.", "It was built in 1889."]);
    }

    #[test]
    fn extract_plain_keeps_brackets() {
        let out = extract_sentences("Keep the marker [1] inside this sentence.", &plain()).unwrap();
        assert_eq!(out, vec!["Keep the marker [1] inside this sentence."]);
    }

    #[test]
    fn extract_applies_nfkc_when_enabled() {
        let cfg = SplitConfig {
            normalize_unicode: true,
            ..plain()
        };
        let out = extract_sentences("\u{FB01}nal answer is here.", &cfg).unwrap();
        assert_eq!(out, vec!["final answer is here."]);
    }

    #[test]
    fn extract_rejects_invalid_config() {
        let cfg = SplitConfig {
            version: 0,
            ..Default::default()
        };
        assert!(extract_sentences("Whatever text goes here.", &cfg).is_err());
    }
}
