//! docdrift sentence embeddings.
//!
//! Turns sentences into fixed-width vectors for cosine comparison. The
//! default backend is [`FeatureEmbedder`], a deterministic feature-hashing
//! surrogate that needs no model files and no network: same text in, same
//! bits out, on every run.
//!
//! Anything implementing [`EmbeddingProvider`] can stand in for it. Remote
//! providers go through [`embed_batch`], which caps concurrency, pauses
//! between batches and turns per-sentence failures into zero vectors.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{FeatureEmbedder, SemanticConfig};
//!
//! let embedder = FeatureEmbedder::new(&SemanticConfig::default()).unwrap();
//! let v = embedder.embed("The sky is blue.");
//! assert_eq!(v.len(), 384);
//! assert_eq!(v, embedder.embed("the sky   is BLUE."));
//! ```

pub mod config;
pub mod error;

mod embedder;
mod normalize;
mod provider;
mod serde_millis;

pub use crate::config::{SemanticConfig, DEFAULT_DIMENSION, MIN_DIMENSION};
pub use crate::embedder::{rolling_hash, FeatureEmbedder};
pub use crate::error::SemanticError;
pub use crate::provider::{embed_batch, EmbeddingProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_embedder_through_batch_matches_embed_all() {
        let cfg = SemanticConfig::default();
        let embedder = FeatureEmbedder::new(&cfg).unwrap();
        let texts = vec![
            "The sky is blue.".to_string(),
            "Water boils at 100 degrees Celsius.".to_string(),
        ];

        let via_batch = embed_batch(&embedder, &texts, &cfg).await;
        assert_eq!(via_batch, embedder.embed_all(&texts));
    }
}
