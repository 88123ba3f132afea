//! # docdrift comparison engine (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` takes two documents that have already been split into
//! sentences, a **source** (the reference) and a **target** (the text under
//! review), and reports for every target sentence how well it is supported
//! by the source.
//!
//! The pipeline is a single deterministic pass:
//!
//! 1. embed every sentence of both documents (concurrently);
//! 2. for each target sentence, scan all source sentences and keep the most
//!    cosine-similar one ([`align`]);
//! 3. classify the best similarity against fixed thresholds ([`classify`]);
//! 4. tally the results and collect potential hallucinations ([`summarize`]).
//!
//! ## Core Types
//!
//! - [`Document`] / [`Sentence`]: input, with embeddings attached on output.
//! - [`SentenceComparison`]: one target sentence, its [`BestMatch`] and
//!   [`MatchStatus`].
//! - [`ComparisonResult`]: every alignment plus a [`ComparisonSummary`].
//! - [`MatchConfig`] / [`ClassifyThresholds`]: classification boundaries
//!   (0.85 match, 0.60 paraphrase, 0.30 hallucination by default).
//! - [`Comparator`]: wires the embedder and the steps above together.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{Comparator, Document, MatchConfig, MatchStatus};
//! use semantic::SemanticConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let comparator = Comparator::from_configs(SemanticConfig::default(), MatchConfig::default())
//!     .expect("valid configs");
//!
//! let source = Document::from_texts("Facts", "https://a.example", ["The sky is blue."]);
//! let target = Document::from_texts("Claims", "https://b.example", ["The sky is blue."]);
//!
//! let result = comparator.compare(source, target).await.expect("compare");
//! assert_eq!(result.alignments[0].status, MatchStatus::Match);
//! assert_eq!(result.summary.matches, 1);
//! # }
//! ```
//!
//! ## Observability
//!
//! Hand a [`CompareMetrics`] implementation to
//! [`Comparator::with_metrics`] to receive per-comparison counts and
//! latencies. Stage timings are also emitted as `tracing` debug events.

pub mod aggregate;
pub mod classify;
pub mod engine;
pub mod metrics;
pub mod similarity;
pub mod types;

pub use crate::aggregate::summarize;
pub use crate::classify::{classify, is_potential_hallucination};
pub use crate::engine::{align, align_with, Comparator};
pub use crate::metrics::{CompareMetrics, CompareStats};
pub use crate::similarity::cosine_similarity;
pub use crate::types::{
    BestMatch, ClassifyThresholds, ComparisonResult, ComparisonSummary, Document, DocumentRole,
    MatchConfig, MatchError, MatchStatus, Sentence, SentenceComparison,
};
