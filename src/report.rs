//! Discrepancy reports.
//!
//! Picks the weakest-supported target sentences out of a
//! [`ComparisonResult`] and turns them into reviewer-facing notes, each
//! pointing back at both documents.

use matcher::{ComparisonResult, SentenceComparison};
use serde::{Deserialize, Serialize};

const HALLUCINATION_NOTE: &str =
    "Potential hallucination: claim not found in the source document or reliable sources.";
const INCONSISTENCY_NOTE: &str =
    "Content differs significantly from the source document. Verify with additional sources.";

/// Selection rules for [`build_report`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// At most this many discrepancies are reported, in target order.
    pub max_discrepancies: usize,
    /// Longer sentences are cut to this many characters and suffixed `...`.
    pub max_sentence_chars: usize,
    /// Non-unique alignments below this similarity are reported too.
    pub flag_below: f32,
    /// Discrepancies below this similarity are labelled hallucinations.
    pub hallucination_below: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_discrepancies: 10,
            max_sentence_chars: 500,
            flag_below: 0.6,
            hallucination_below: 0.3,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_sentence_chars == 0 {
            return Err("max_sentence_chars must be >= 1".into());
        }
        if !(0.0 <= self.hallucination_below
            && self.hallucination_below <= self.flag_below
            && self.flag_below <= 1.0)
        {
            return Err(format!(
                "must satisfy 0 <= hallucination_below ({}) <= flag_below ({}) <= 1",
                self.hallucination_below, self.flag_below
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    Hallucination,
    FactualInconsistency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discrepancy {
    /// `d1`, `d2`, ... in report order.
    pub id: String,
    pub target_sentence: String,
    pub source_sentence: Option<String>,
    /// Rounded to three decimals.
    pub similarity_score: f32,
    /// Source URL, then target URL.
    pub evidence: Vec<String>,
    pub note: String,
    pub kind: DiscrepancyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscrepancyReport {
    pub topic: String,
    pub summary: String,
    pub discrepancies: Vec<Discrepancy>,
    /// Taken from the comparison summary, not from `discrepancies`, so it
    /// also counts hallucinations beyond the cap.
    pub potential_hallucinations: usize,
}

/// Builds the discrepancy report for `result`.
///
/// An alignment is reported when it is unique or scores below
/// `cfg.flag_below`.
pub fn build_report(result: &ComparisonResult, cfg: &ReportConfig) -> DiscrepancyReport {
    let evidence = vec![
        result.source_document.url.clone(),
        result.target_document.url.clone(),
    ];

    let discrepancies: Vec<Discrepancy> = result
        .alignments
        .iter()
        .filter(|a| is_discrepancy(a, cfg))
        .take(cfg.max_discrepancies)
        .enumerate()
        .map(|(n, alignment)| {
            let hallucination = alignment.similarity < cfg.hallucination_below;
            Discrepancy {
                id: format!("d{}", n + 1),
                target_sentence: truncate(&alignment.target_sentence.text, cfg.max_sentence_chars),
                source_sentence: alignment
                    .best_match
                    .as_ref()
                    .map(|b| truncate(&b.source_sentence.text, cfg.max_sentence_chars)),
                similarity_score: round3(alignment.similarity),
                evidence: evidence.clone(),
                note: if hallucination {
                    HALLUCINATION_NOTE
                } else {
                    INCONSISTENCY_NOTE
                }
                .to_string(),
                kind: if hallucination {
                    DiscrepancyKind::Hallucination
                } else {
                    DiscrepancyKind::FactualInconsistency
                },
            }
        })
        .collect();

    let potential_hallucinations = result.summary.potential_hallucinations.len();
    DiscrepancyReport {
        topic: result.topic.clone(),
        summary: format!(
            "Auto-detected {} discrepancies between the target and source documents. Found {} potential hallucinations.",
            discrepancies.len(),
            potential_hallucinations
        ),
        discrepancies,
        potential_hallucinations,
    }
}

/// Human-readable bucket for a similarity score.
pub fn similarity_label(similarity: f32) -> &'static str {
    if similarity >= 0.85 {
        "Match"
    } else if similarity >= 0.6 {
        "Paraphrase"
    } else {
        "Unique/Hallucination"
    }
}

fn is_discrepancy(alignment: &SentenceComparison, cfg: &ReportConfig) -> bool {
    alignment.status == matcher::MatchStatus::Unique || alignment.similarity < cfg.flag_below
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn round3(value: f32) -> f32 {
    ((value as f64 * 1000.0).round() / 1000.0) as f32
}
