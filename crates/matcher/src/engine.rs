use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use semantic::{embed_batch, EmbeddingProvider, FeatureEmbedder, SemanticConfig};
use tracing::{debug, warn};

use crate::aggregate::summarize;
use crate::metrics::{CompareMetrics, CompareStats};
use crate::similarity::cosine_similarity;
use crate::types::{
    BestMatch, ClassifyThresholds, ComparisonResult, Document, DocumentRole, MatchConfig,
    MatchError, MatchStatus, Sentence, SentenceComparison,
};


/// Aligns `target` against every source sentence using the default
/// thresholds. See [`align_with`].
pub fn align(target: &Sentence, sources: &[Sentence]) -> SentenceComparison {
    align_with(target, sources, &ClassifyThresholds::default())
}

/// Finds the most similar source sentence for `target` and classifies it.
///
/// Sources are scanned in order and a later source only replaces the current
/// best when strictly more similar, so the first of several equal scores
/// wins. Sources without an embedding are skipped. Several targets may align
/// to the same source.
///
/// A target without an embedding is reported as unique with similarity 0
/// and no best match.
pub fn align_with(
    target: &Sentence,
    sources: &[Sentence],
    thresholds: &ClassifyThresholds,
) -> SentenceComparison {
    let Some(target_vec) = target.embedding.as_deref() else {
        return SentenceComparison {
            target_sentence: target.clone(),
            best_match: None,
            status: MatchStatus::Unique,
            similarity: 0.0,
        };
    };

    let mut best: Option<(&Sentence, f32)> = None;
    for source in sources {
        let source_vec = match source.embedding.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };
        let similarity = cosine_similarity(target_vec, source_vec);
        if best.is_none_or(|(_, current)| similarity > current) {
            best = Some((source, similarity));
        }
    }

    let similarity = best.map_or(0.0, |(_, s)| s);
    SentenceComparison {
        target_sentence: target.clone(),
        best_match: best.map(|(source, similarity)| BestMatch {
            source_sentence: source.clone(),
            similarity,
        }),
        status: thresholds.classify(similarity),
        similarity,
    }
}

/// Runs complete source/target comparisons.
///
/// Embeds both documents, aligns every target sentence against the source,
/// classifies and aggregates. Each call owns its data; a `Comparator` can be
/// shared across tasks behind an `Arc`.
pub struct Comparator {
    embedder: FeatureEmbedder,
    semantic_cfg: SemanticConfig,
    match_cfg: MatchConfig,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    metrics: Option<Arc<dyn CompareMetrics>>,
}

impl Comparator {
    pub fn new(embedder: FeatureEmbedder, semantic_cfg: SemanticConfig, match_cfg: MatchConfig) -> Self {
        Self {
            embedder,
            semantic_cfg,
            match_cfg,
            provider: None,
            metrics: None,
        }
    }

    /// Builds a comparator with the local feature embedder configured from
    /// `semantic_cfg`.
    pub fn from_configs(semantic_cfg: SemanticConfig, match_cfg: MatchConfig) -> Result<Self, MatchError> {
        let embedder = FeatureEmbedder::new(&semantic_cfg)
            .map_err(|e| MatchError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(embedder, semantic_cfg, match_cfg))
    }

    /// Routes embedding through `provider` instead of the local embedder.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn CompareMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.match_cfg
    }

    pub fn semantic_config(&self) -> &SemanticConfig {
        &self.semantic_cfg
    }

    /// Compares `target` against `source`.
    ///
    /// Both documents must contain at least one sentence; this is checked
    /// before anything is embedded. Any embeddings already attached to the
    /// input sentences are replaced.
    pub async fn compare(&self, source: Document, target: Document) -> Result<ComparisonResult, MatchError> {
        let result = self.run(source, target).await;
        if let (Err(err), Some(metrics)) = (&result, &self.metrics) {
            metrics.record_failure(err);
        }
        result
    }

    async fn run(&self, mut source: Document, mut target: Document) -> Result<ComparisonResult, MatchError> {
        let started = Instant::now();

        self.match_cfg.validate()?;
        self.semantic_cfg
            .validate()
            .map_err(|e| MatchError::InvalidConfig(e.to_string()))?;
        check_not_empty(&source, DocumentRole::Source)?;
        check_not_empty(&target, DocumentRole::Target)?;
        check_sentences(&source, DocumentRole::Source)?;
        check_sentences(&target, DocumentRole::Target)?;

        // --- Embedding ---
        let (source_vectors, target_vectors) = tokio::join!(
            self.embed_texts(sentence_texts(&source)),
            self.embed_texts(sentence_texts(&target)),
        );
        attach(&mut source, source_vectors?)?;
        attach(&mut target, target_vectors?)?;
        let embed_latency = started.elapsed();

        // --- Alignment ---
        let align_started = Instant::now();
        let thresholds = self.match_cfg.thresholds;
        let alignments: Vec<SentenceComparison> = if self.match_cfg.parallel && target.len() > 1 {
            target
                .sentences
                .par_iter()
                .map(|t| align_with(t, &source.sentences, &thresholds))
                .collect()
        } else {
            target
                .sentences
                .iter()
                .map(|t| align_with(t, &source.sentences, &thresholds))
                .collect()
        };
        let summary = summarize(&alignments, &thresholds);
        let align_latency = align_started.elapsed();

        let stats = CompareStats {
            source_sentences: source.len(),
            target_sentences: target.len(),
            matches: summary.matches,
            paraphrases: summary.paraphrases,
            unique: summary.unique,
            potential_hallucinations: summary.potential_hallucinations.len(),
            embed_latency,
            align_latency,
            total_latency: started.elapsed(),
        };
        debug!(
            source_sentences = stats.source_sentences,
            target_sentences = stats.target_sentences,
            matches = stats.matches,
            paraphrases = stats.paraphrases,
            unique = stats.unique,
            potential_hallucinations = stats.potential_hallucinations,
            embed_ms = embed_latency.as_millis() as u64,
            align_ms = align_latency.as_millis() as u64,
            "comparison complete"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_comparison(&stats);
        }

        Ok(ComparisonResult {
            topic: target.title.clone(),
            source_document: source,
            target_document: target,
            alignments,
            summary,
        })
    }

    async fn embed_texts(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, MatchError> {
        match &self.provider {
            Some(provider) => Ok(embed_batch(provider.as_ref(), &texts, &self.semantic_cfg).await),
            None => {
                let embedder = self.embedder.clone();
                tokio::task::spawn_blocking(move || embedder.embed_all(&texts))
                    .await
                    .map_err(|e| MatchError::Embedding(format!("embedding task failed: {e}")))
            }
        }
    }
}

fn check_not_empty(doc: &Document, role: DocumentRole) -> Result<(), MatchError> {
    if doc.is_empty() {
        warn!(%role, url = %doc.url, "document has no sentences");
        return Err(MatchError::ExtractionEmpty { role });
    }
    Ok(())
}

fn check_sentences(doc: &Document, role: DocumentRole) -> Result<(), MatchError> {
    match doc.sentences.iter().position(|s| s.text.trim().is_empty()) {
        Some(pos) => Err(MatchError::InvalidRequest(format!(
            "{role} sentence {pos} has no text"
        ))),
        None => Ok(()),
    }
}

fn sentence_texts(doc: &Document) -> Vec<String> {
    doc.sentences.iter().map(|s| s.text.clone()).collect()
}

fn attach(doc: &mut Document, vectors: Vec<Vec<f32>>) -> Result<(), MatchError> {
    if vectors.len() != doc.sentences.len() {
        return Err(MatchError::Embedding(format!(
            "expected {} vectors, got {}",
            doc.sentences.len(),
            vectors.len()
        )));
    }
    for (sentence, vector) in doc.sentences.iter_mut().zip(vectors) {
        sentence.embedding = Some(vector);
    }
    Ok(())
}
