//! Configuration types for sentence extraction.
//!
//! [`SplitConfig`] controls which cleanup passes run before a text is cut
//! into sentences, and how short a fragment may be before it is discarded.
//!
//! # Versioning
//!
//! The `version` field tracks behavior changes of the splitter. Any change to
//! the cleanup or boundary rules (even bug fixes) must bump it so that stored
//! comparisons can be traced back to the rules that produced their sentences.
//!
//! # Examples
//!
//! ```rust
//! use canonical::SplitConfig;
//!
//! let config = SplitConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.min_sentence_chars, 10);
//! assert!(config.strip_markup);
//! ```
//!
//! ## Plain text input
//!
//! ```rust
//! use canonical::SplitConfig;
//!
//! let config = SplitConfig {
//!     strip_markup: false,
//!     strip_reference_markers: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the sentence extraction pipeline.
///
/// Cheap to clone and serializable so it can live inside larger pipeline
/// configs:
///
/// ```json
/// {
///   "version": 1,
///   "min_sentence_chars": 10,
///   "strip_markup": true,
///   "strip_reference_markers": true,
///   "normalize_unicode": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SplitConfig {
    /// Version of the splitting rules. Must be >= 1; version 0 is reserved.
    pub version: u32,

    /// Fragments whose character count is at or below this value are
    /// dropped. Counts Unicode scalar values, not bytes.
    ///
    /// The default of 10 filters list bullets, stray headings and other
    /// debris left behind by markup extraction.
    pub min_sentence_chars: usize,

    /// Remove `<...>` tags and decode the common HTML entities before
    /// splitting.
    pub strip_markup: bool,

    /// Remove encyclopedia-style reference markers: `[12]`,
    /// `[citation needed]` and `[edit]`.
    pub strip_reference_markers: bool,

    /// Apply Unicode NFKC normalization before any other pass.
    ///
    /// Off by default so sentence text is returned exactly as written,
    /// apart from whitespace.
    pub normalize_unicode: bool,
}

impl SplitConfig {
    /// Check the configuration before use.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            version: 1,
            min_sentence_chars: 10,
            strip_markup: true,
            strip_reference_markers: true,
            normalize_unicode: false,
        }
    }
}
