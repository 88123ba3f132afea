//! Workspace umbrella crate for docdrift.
//!
//! This crate stitches sentence extraction, embedding and alignment together
//! so callers can compare two raw texts with a single API entry point, and
//! turn the result into a discrepancy report.
//!
//! ```
//! use docdrift::{compare_texts, DocdriftConfig, MatchStatus, RawDocument};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = RawDocument::new("Facts", "https://a.example", "<p>The sky is blue.[1]</p>");
//! let target = RawDocument::new("Claims", "https://b.example", "The sky is blue.");
//!
//! let result = compare_texts(source, target, &DocdriftConfig::default())
//!     .await
//!     .expect("compare");
//! assert_eq!(result.alignments[0].status, MatchStatus::Match);
//! # }
//! ```

pub mod config;
pub mod report;

pub use canonical::{
    CanonicalError, SplitConfig, collapse_whitespace, extract_sentences, normalize_markup,
    split_sentences, strip_reference_markers,
};
pub use config::{ConfigLoadError, DocdriftConfig};
pub use matcher::{
    BestMatch, ClassifyThresholds, CompareMetrics, CompareStats, Comparator, ComparisonResult,
    ComparisonSummary, Document, DocumentRole, MatchConfig, MatchError, MatchStatus, Sentence,
    SentenceComparison, align, align_with, classify, cosine_similarity,
    is_potential_hallucination, summarize,
};
pub use report::{
    Discrepancy, DiscrepancyKind, DiscrepancyReport, ReportConfig, build_report, similarity_label,
};
pub use semantic::{
    EmbeddingProvider, FeatureEmbedder, SemanticConfig, SemanticError, embed_batch, rolling_hash,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while running a comparison through the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {0}")]
    Config(String),
    #[error("sentence extraction failure: {0}")]
    Canonical(#[from] CanonicalError),
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// A document before sentence extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDocument {
    pub title: String,
    pub url: String,
    /// Extracted page text; leftover markup is cleaned per [`SplitConfig`].
    pub text: String,
}

impl RawDocument {
    pub fn new(title: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Splits `raw_text` into a [`Document`] with sentences numbered from zero.
///
/// An empty sentence list is not an error here; the comparator rejects it
/// with the document's role attached.
pub fn prepare_document(
    title: impl Into<String>,
    url: impl Into<String>,
    raw_text: &str,
    cfg: &SplitConfig,
) -> Result<Document, PipelineError> {
    let sentences = extract_sentences(raw_text, cfg)?;
    let doc = Document::from_texts(title, url, sentences);
    debug!(url = %doc.url, sentences = doc.len(), "document prepared");
    Ok(doc)
}

/// A configured comparison pipeline.
///
/// Built once and reused; every call owns its documents, so a `Pipeline`
/// can be shared across tasks behind an `Arc`.
pub struct Pipeline {
    config: DocdriftConfig,
    comparator: Comparator,
}

impl Pipeline {
    pub fn new(config: DocdriftConfig) -> Result<Self, PipelineError> {
        config
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        let comparator = Comparator::from_configs(config.semantic.clone(), config.matcher.clone())?;
        Ok(Self { config, comparator })
    }

    /// Routes embedding through `provider` instead of the local embedder.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.comparator = self.comparator.with_provider(provider);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn CompareMetrics>) -> Self {
        self.comparator = self.comparator.with_metrics(metrics);
        self
    }

    pub fn config(&self) -> &DocdriftConfig {
        &self.config
    }

    /// Extracts sentences from both texts and compares them.
    pub async fn compare_texts(
        &self,
        source: RawDocument,
        target: RawDocument,
    ) -> Result<ComparisonResult, PipelineError> {
        let source = self.prepare(source)?;
        let target = self.prepare(target)?;
        self.compare_documents(source, target).await
    }

    /// Compares documents that are already split into sentences.
    pub async fn compare_documents(
        &self,
        source: Document,
        target: Document,
    ) -> Result<ComparisonResult, PipelineError> {
        Ok(self.comparator.compare(source, target).await?)
    }

    /// Builds the discrepancy report for an already computed comparison.
    pub fn report(&self, result: &ComparisonResult) -> DiscrepancyReport {
        build_report(result, &self.config.report)
    }

    /// Compares both texts and reports the discrepancies found.
    pub async fn discrepancies(
        &self,
        source: RawDocument,
        target: RawDocument,
    ) -> Result<DiscrepancyReport, PipelineError> {
        let result = self.compare_texts(source, target).await?;
        Ok(self.report(&result))
    }

    fn prepare(&self, raw: RawDocument) -> Result<Document, PipelineError> {
        prepare_document(raw.title, raw.url, &raw.text, &self.config.canonical)
    }
}

/// One-shot text comparison with explicit configuration.
pub async fn compare_texts(
    source: RawDocument,
    target: RawDocument,
    config: &DocdriftConfig,
) -> Result<ComparisonResult, PipelineError> {
    Pipeline::new(config.clone())?
        .compare_texts(source, target)
        .await
}

/// One-shot comparison of already-split documents.
pub async fn compare_documents(
    source: Document,
    target: Document,
    config: &DocdriftConfig,
) -> Result<ComparisonResult, PipelineError> {
    Pipeline::new(config.clone())?
        .compare_documents(source, target)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_document_numbers_sentences() {
        let doc = prepare_document(
            "Sky",
            "https://a.example",
            "<p>The sky is blue.[2]</p> Water boils at 100 degrees Celsius.",
            &SplitConfig::default(),
        )
        .unwrap();
        assert_eq!(doc.title, "Sky");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.sentences[0].text, "The sky is blue.");
        assert_eq!(doc.sentences[1].index, 1);
        assert!(doc.sentences.iter().all(|s| s.embedding.is_none()));
    }

    #[test]
    fn prepare_document_allows_empty_result() {
        let doc = prepare_document("t", "u", "Hi.", &SplitConfig::default()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn pipeline_rejects_invalid_config() {
        let mut config = DocdriftConfig::default();
        config.report.flag_below = 0.1;
        assert!(matches!(
            Pipeline::new(config),
            Err(PipelineError::Config(msg)) if msg.contains("report")
        ));
    }

    #[test]
    fn pipeline_reports_semantic_config_errors_as_config() {
        let mut config = DocdriftConfig::default();
        config.semantic.dimension = 4;
        assert!(matches!(
            Pipeline::new(config),
            Err(PipelineError::Config(msg)) if msg.contains("semantic")
        ));
    }

    #[tokio::test]
    async fn empty_target_extraction_is_reported_by_role() {
        let err = compare_texts(
            RawDocument::new("S", "https://a.example", "The sky is blue."),
            RawDocument::new("T", "https://b.example", "<p>Ok.</p>"),
            &DocdriftConfig::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            PipelineError::Match(MatchError::ExtractionEmpty {
                role: DocumentRole::Target
            })
        );
        assert!(err.to_string().contains("target"));
    }

    #[tokio::test]
    async fn discrepancies_empty_when_target_is_supported() {
        let pipeline = Pipeline::new(DocdriftConfig::default()).unwrap();
        let report = pipeline
            .discrepancies(
                RawDocument::new(
                    "Facts",
                    "https://a.example",
                    "The sky is blue. Water boils at 100 degrees Celsius.",
                ),
                RawDocument::new(
                    "Claims",
                    "https://b.example",
                    "The sky is blue. Water boils at one hundred degrees Celsius.",
                ),
            )
            .await
            .unwrap();
        assert_eq!(report.topic, "Claims");
        assert!(report.discrepancies.is_empty());
        assert_eq!(report.potential_hallucinations, 0);
    }
}
