use crate::types::{ClassifyThresholds, ComparisonSummary, MatchStatus, SentenceComparison};

/// Tallies alignments by status and collects potential hallucinations in
/// order. `missing` is always 0: source sentences are never checked for a
/// counterpart in the target.
pub fn summarize(
    alignments: &[SentenceComparison],
    thresholds: &ClassifyThresholds,
) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total_target_sentences: alignments.len(),
        matches: 0,
        paraphrases: 0,
        unique: 0,
        missing: 0,
        potential_hallucinations: Vec::new(),
    };

    for alignment in alignments {
        match alignment.status {
            MatchStatus::Match => summary.matches += 1,
            MatchStatus::Paraphrase => summary.paraphrases += 1,
            MatchStatus::Unique => summary.unique += 1,
            MatchStatus::Missing => summary.missing += 1,
        }
        if thresholds.is_potential_hallucination(alignment) {
            summary.potential_hallucinations.push(alignment.clone());
        }
    }

    summary
}
