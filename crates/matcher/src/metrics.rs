// Metrics hooks for the comparison engine.
//
// A `CompareMetrics` observer is handed to each `Comparator` through
// `Comparator::with_metrics`; there is no process-wide recorder. This keeps
// instrumentation decoupled from any specific metrics backend.
use std::time::Duration;

use crate::types::MatchError;

/// Figures reported after a successful comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareStats {
    pub source_sentences: usize,
    pub target_sentences: usize,
    pub matches: usize,
    pub paraphrases: usize,
    pub unique: usize,
    pub potential_hallucinations: usize,
    /// Wall-clock time spent embedding both documents.
    pub embed_latency: Duration,
    /// Wall-clock time spent aligning and aggregating.
    pub align_latency: Duration,
    pub total_latency: Duration,
}

/// Metrics observer for comparisons.
pub trait CompareMetrics: Send + Sync {
    fn record_comparison(&self, stats: &CompareStats);

    /// Called when a comparison is rejected or fails. Ignored by default.
    fn record_failure(&self, _error: &MatchError) {}
}
