//! docdrift sentence layer.
//!
//! Turns extracted page text into the ordered sentence list the comparison
//! engine consumes. Fetching pages and isolating their main content happen
//! upstream; this crate only cleans what is left and cuts it into sentences.
//!
//! ## What we do
//!
//! - Optional Unicode NFKC normalization
//! - Tag stripping and entity decoding for leftover markup
//! - Removal of citation markers (`[12]`, `[citation needed]`, ...)
//! - Whitespace normalization (collapses to single spaces)
//! - Sentence splitting with a minimum-length filter
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config in,
//! same sentences out, on any machine.
//!
//! ```rust
//! use canonical::{extract_sentences, SplitConfig};
//!
//! let html = "<p>The sky is blue.[1] Water boils at 100 degrees Celsius.</p>";
//! let sentences = extract_sentences(html, &SplitConfig::default()).unwrap();
//! assert_eq!(
//!     sentences,
//!     vec!["The sky is blue.", "Water boils at 100 degrees Celsius."]
//! );
//! ```

mod config;
mod error;
mod markup;
mod sentence;
mod whitespace;

pub use crate::config::SplitConfig;
pub use crate::error::CanonicalError;
pub use crate::markup::{normalize_markup, strip_reference_markers};
pub use crate::sentence::{extract_sentences, split_sentences};
pub use crate::whitespace::collapse_whitespace;
