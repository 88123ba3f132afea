use crate::types::{ClassifyThresholds, MatchStatus, SentenceComparison};

impl ClassifyThresholds {
    /// Maps a similarity score to a status. Lower bounds are inclusive.
    pub fn classify(&self, similarity: f32) -> MatchStatus {
        if similarity >= self.match_min {
            MatchStatus::Match
        } else if similarity >= self.paraphrase_min {
            MatchStatus::Paraphrase
        } else {
            MatchStatus::Unique
        }
    }

    /// A unique alignment whose similarity is below `hallucination_max`.
    pub fn is_potential_hallucination(&self, comparison: &SentenceComparison) -> bool {
        comparison.status == MatchStatus::Unique && comparison.similarity < self.hallucination_max
    }
}

/// [`ClassifyThresholds::classify`] with the default 0.85 / 0.60 boundaries.
pub fn classify(similarity: f32) -> MatchStatus {
    ClassifyThresholds::default().classify(similarity)
}

/// [`ClassifyThresholds::is_potential_hallucination`] with the default 0.30
/// cut-off.
pub fn is_potential_hallucination(comparison: &SentenceComparison) -> bool {
    ClassifyThresholds::default().is_potential_hallucination(comparison)
}
