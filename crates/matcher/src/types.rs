use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One sentence of a document, with its vector once embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentence {
    pub text: String,
    /// Zero-based position within its document.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
            embedding: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// An ordered list of sentences plus the page metadata it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Builds a document from already-split sentence texts, numbering them
    /// from zero in iteration order.
    pub fn from_texts<I, S>(title: impl Into<String>, url: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sentences = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Sentence::new(text, index))
            .collect();
        Self {
            title: title.into(),
            url: url.into(),
            sentences,
        }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn strip_embeddings(&mut self) {
        for sentence in &mut self.sentences {
            sentence.embedding = None;
        }
    }
}

/// Which side of a comparison something refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRole {
    Source,
    Target,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Source => f.write_str("source"),
            DocumentRole::Target => f.write_str("target"),
        }
    }
}

/// The most similar source sentence found for a target sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestMatch {
    pub source_sentence: Sentence,
    pub similarity: f32,
}

/// Classification of a single alignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Match,
    Paraphrase,
    Unique,
    /// Reserved for source sentences with no counterpart in the target.
    /// Never produced: only target-to-source alignment is performed.
    Missing,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Match => "match",
            MatchStatus::Paraphrase => "paraphrase",
            MatchStatus::Unique => "unique",
            MatchStatus::Missing => "missing",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alignment of one target sentence against the whole source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentenceComparison {
    pub target_sentence: Sentence,
    pub best_match: Option<BestMatch>,
    pub status: MatchStatus,
    /// Similarity of `best_match`, or 0 when there is none.
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSummary {
    pub total_target_sentences: usize,
    pub matches: usize,
    pub paraphrases: usize,
    pub unique: usize,
    pub missing: usize,
    /// Unique alignments scoring below the hallucination threshold, in
    /// target order.
    pub potential_hallucinations: Vec<SentenceComparison>,
}

/// Full output of one source/target comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    /// Title of the target document.
    pub topic: String,
    pub source_document: Document,
    pub target_document: Document,
    /// One entry per target sentence, in target order.
    pub alignments: Vec<SentenceComparison>,
    pub summary: ComparisonSummary,
}

impl ComparisonResult {
    /// Drops every attached vector. Outer surfaces call this before
    /// serializing a result they do not want to ship embeddings with.
    pub fn strip_embeddings(&mut self) {
        self.source_document.strip_embeddings();
        self.target_document.strip_embeddings();
        for alignment in self
            .alignments
            .iter_mut()
            .chain(self.summary.potential_hallucinations.iter_mut())
        {
            alignment.target_sentence.embedding = None;
            if let Some(best) = alignment.best_match.as_mut() {
                best.source_sentence.embedding = None;
            }
        }
    }
}

/// Similarity boundaries used to classify alignments.
///
/// `similarity >= match_min` is a match, `similarity >= paraphrase_min` a
/// paraphrase, anything lower is unique. Unique alignments below
/// `hallucination_max` are flagged as potential hallucinations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifyThresholds {
    pub match_min: f32,
    pub paraphrase_min: f32,
    pub hallucination_max: f32,
}

impl Default for ClassifyThresholds {
    fn default() -> Self {
        Self {
            match_min: 0.85,
            paraphrase_min: 0.60,
            hallucination_max: 0.30,
        }
    }
}

/// Configuration for the comparison engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Configuration schema version.
    pub version: String,
    pub thresholds: ClassifyThresholds,
    /// Align target sentences across the rayon pool.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: "v1".into(),
            thresholds: ClassifyThresholds::default(),
            parallel: true,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version.trim().is_empty() {
            return Err(MatchError::InvalidConfig(
                "config.version must not be empty".into(),
            ));
        }
        let t = &self.thresholds;
        let ordered = 0.0 <= t.hallucination_max
            && t.hallucination_max < t.paraphrase_min
            && t.paraphrase_min <= t.match_min
            && t.match_min <= 1.0;
        if !ordered {
            return Err(MatchError::InvalidConfig(format!(
                "thresholds must satisfy 0 <= hallucination_max ({}) < paraphrase_min ({}) <= match_min ({}) <= 1",
                t.hallucination_max, t.paraphrase_min, t.match_min
            )));
        }
        Ok(())
    }
}

/// Errors produced by the comparison engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Malformed input, such as a sentence with no text.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A document produced no sentences.
    #[error("no sentences could be extracted from the {role} document")]
    ExtractionEmpty { role: DocumentRole },
    #[error("embedding failed: {0}")]
    Embedding(String),
}
