//! Provider seam for embedding backends.
//!
//! The comparison engine only needs "text in, vector out". The local
//! [`crate::FeatureEmbedder`] implements it without ever failing; a
//! network-backed model can implement the same trait and be driven through
//! [`embed_batch`], which bounds in-flight requests and never lets one bad
//! sentence sink the whole batch.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::SemanticConfig;
use crate::error::SemanticError;
use crate::normalize::ensure_finite;

/// A source of sentence embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Label surfaced in logs.
    fn model_name(&self) -> &str;

    /// Width of the vectors this provider returns. Used to size the zero
    /// vector that replaces a failed sentence.
    fn dims(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError>;
}

/// Embeds `texts` through `provider`, `cfg.max_concurrency` requests at a
/// time, sleeping `cfg.batch_pause` between groups.
///
/// The result is positionally aligned with `texts`. A sentence whose request
/// fails, or whose vector contains non-finite values, gets a zero vector of
/// `provider.dims()` and a warning; the rest of the batch is unaffected.
pub async fn embed_batch<S>(
    provider: &dyn EmbeddingProvider,
    texts: &[S],
    cfg: &SemanticConfig,
) -> Vec<Vec<f32>>
where
    S: AsRef<str> + Sync,
{
    let group_size = cfg.max_concurrency.max(1);
    let mut vectors = Vec::with_capacity(texts.len());

    for (group_idx, group) in texts.chunks(group_size).enumerate() {
        if group_idx > 0 && !cfg.batch_pause.is_zero() {
            tokio::time::sleep(cfg.batch_pause).await;
        }

        let results = join_all(group.iter().map(|t| provider.embed(t.as_ref()))).await;

        for (offset, result) in results.into_iter().enumerate() {
            let index = group_idx * group_size + offset;
            let checked = result.and_then(|v| ensure_finite(&v).map(|()| v));
            match checked {
                Ok(vector) => vectors.push(vector),
                Err(err) => {
                    warn!(
                        model = provider.model_name(),
                        index,
                        error = %err,
                        "sentence embedding degraded to zero vector"
                    );
                    vectors.push(vec![0.0; provider.dims()]);
                }
            }
        }
    }

    debug!(
        model = provider.model_name(),
        sentences = texts.len(),
        "provider batch complete"
    );
    vectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fails on any sentence containing "fail", returns NaN for "nan".
    struct FlakyProvider {
        calls: AtomicUsize,
    }

    impl FlakyProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for FlakyProvider {
        fn model_name(&self) -> &str {
            "flaky"
        }

        fn dims(&self) -> usize {
            3
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("fail") {
                return Err(SemanticError::Provider(format!("refused: {text}")));
            }
            if text.contains("nan") {
                return Ok(vec![f32::NAN, 0.0, 0.0]);
            }
            Ok(vec![text.len() as f32, 1.0, 0.0])
        }
    }

    fn cfg(max_concurrency: usize) -> SemanticConfig {
        SemanticConfig {
            max_concurrency,
            batch_pause: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn failures_become_zero_vectors_in_place() {
        let provider = FlakyProvider::new();
        let texts = ["ok", "please fail", "fine!", "nan here", "last"];
        let out = embed_batch(&provider, &texts, &cfg(2)).await;

        assert_eq!(out.len(), 5);
        assert_eq!(out[0], vec![2.0, 1.0, 0.0]);
        assert_eq!(out[1], vec![0.0, 0.0, 0.0]);
        assert_eq!(out[2], vec![5.0, 1.0, 0.0]);
        assert_eq!(out[3], vec![0.0, 0.0, 0.0]);
        assert_eq!(out[4], vec![4.0, 1.0, 0.0]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn empty_batch_makes_no_calls() {
        let provider = FlakyProvider::new();
        let texts: [&str; 0] = [];
        let out = embed_batch(&provider, &texts, &cfg(10)).await;
        assert!(out.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_groups_only() {
        let provider = FlakyProvider::new();
        let texts = ["a", "b", "c", "d", "e"];
        let config = SemanticConfig {
            max_concurrency: 2,
            batch_pause: Duration::from_millis(100),
            ..Default::default()
        };

        let start = tokio::time::Instant::now();
        let out = embed_batch(&provider, &texts, &config).await;
        assert_eq!(out.len(), 5);
        // Three groups, two pauses.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(300));
    }
}
