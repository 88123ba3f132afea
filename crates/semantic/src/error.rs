use thiserror::Error;

/// Errors surfaced by the embedding layer.
///
/// Only configuration errors ever reach callers of [`crate::FeatureEmbedder`];
/// `Provider` and `Degraded` are produced per sentence and absorbed by
/// [`crate::embed_batch`], which substitutes a zero vector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// Configuration is inconsistent (dimension too small, zero concurrency, ...).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
    /// An embedding provider failed to produce a vector.
    #[error("embedding provider failure: {0}")]
    Provider(String),
    /// A vector was produced but contained NaN or infinite components.
    #[error("embedding degraded: {0}")]
    Degraded(String),
}
