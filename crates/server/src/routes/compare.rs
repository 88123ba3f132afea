use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use canonical::SplitConfig;
use docdrift::{prepare_document, ComparisonResult, Document, DocumentRole};
use serde::Deserialize;
use std::sync::Arc;

/// One side of a comparison.
///
/// Either raw `text`, which is split into sentences server-side, or a
/// pre-split `sentences` list. `sentences` wins when both are present.
#[derive(Debug, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sentences: Option<Vec<String>>,
}

/// Compare request
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub source: DocumentInput,
    pub target: DocumentInput,
    /// Return the sentence embeddings with the result.
    #[serde(default)]
    pub include_embeddings: bool,
}

impl DocumentInput {
    fn into_document(self, role: DocumentRole, split: &SplitConfig) -> ServerResult<Document> {
        let title = self.title.unwrap_or_default();
        let url = self.url.unwrap_or_default();
        match (self.sentences, self.text) {
            (Some(sentences), _) => Ok(Document::from_texts(title, url, sentences)),
            (None, Some(text)) => Ok(prepare_document(title, url, &text, split)?),
            (None, None) => Err(ServerError::InvalidRequest(format!(
                "{role} document needs either `text` or `sentences`"
            ))),
        }
    }
}

async fn run_comparison(
    state: &ServerState,
    request: CompareRequest,
) -> ServerResult<ComparisonResult> {
    let split = &state.pipeline.config().canonical;
    let source = request.source.into_document(DocumentRole::Source, split)?;
    let target = request.target.into_document(DocumentRole::Target, split)?;

    tracing::debug!(
        source_sentences = source.len(),
        target_sentences = target.len(),
        "comparing documents"
    );

    let mut result = state.pipeline.compare_documents(source, target).await?;
    if !request.include_embeddings {
        result.strip_embeddings();
    }
    Ok(result)
}

/// Align every target sentence with its closest source sentence.
///
/// Returns the full comparison: both documents, one alignment per target
/// sentence and the summary counts.
pub async fn compare_documents(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CompareRequest>,
) -> ServerResult<impl IntoResponse> {
    let result = run_comparison(&state, request).await?;

    tracing::info!(
        topic = %result.topic,
        matches = result.summary.matches,
        paraphrases = result.summary.paraphrases,
        unique = result.summary.unique,
        potential_hallucinations = result.summary.potential_hallucinations.len(),
        "comparison served"
    );

    Ok(Json(result))
}

/// Compare and return only the discrepancy report.
pub async fn discrepancies(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CompareRequest>,
) -> ServerResult<impl IntoResponse> {
    let result = run_comparison(&state, request).await?;
    let report = state.pipeline.report(&result);

    tracing::info!(
        topic = %report.topic,
        discrepancies = report.discrepancies.len(),
        potential_hallucinations = report.potential_hallucinations,
        "discrepancy report served"
    );

    Ok(Json(report))
}
