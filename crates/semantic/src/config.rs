use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SemanticError;

/// Default vector width produced by [`crate::FeatureEmbedder`].
pub const DEFAULT_DIMENSION: usize = 384;

/// Smallest dimension that still leaves room for the two hashed bands and
/// the five statistics slots. At this width the ordinal band is empty.
pub const MIN_DIMENSION: usize = 15;

/// Runtime configuration for sentence embedding.
///
/// `max_concurrency` and `batch_pause` only matter when a network-backed
/// [`crate::EmbeddingProvider`] is plugged in; the local feature embedder is
/// CPU bound and ignores them.
///
/// # Example
/// ```
/// use semantic::SemanticConfig;
/// use std::time::Duration;
///
/// let cfg = SemanticConfig {
///     max_concurrency: 4,
///     batch_pause: Duration::from_millis(250),
///     ..Default::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    /// Label reported by the local embedder as its model name.
    pub model_name: String,
    /// Vector width of the feature embedder.
    pub dimension: usize,
    /// Embed batches across the rayon pool instead of sequentially.
    pub parallel: bool,
    /// Provider requests in flight per batch.
    pub max_concurrency: usize,
    /// Pause between provider batches, in milliseconds on the wire.
    #[serde(with = "crate::serde_millis")]
    pub batch_pause: Duration,
}

impl SemanticConfig {
    pub fn validate(&self) -> Result<(), SemanticError> {
        if self.dimension < MIN_DIMENSION {
            return Err(SemanticError::InvalidConfig(format!(
                "dimension must be >= {MIN_DIMENSION}, got {}",
                self.dimension
            )));
        }
        if self.max_concurrency == 0 {
            return Err(SemanticError::InvalidConfig(
                "max_concurrency must be >= 1".into(),
            ));
        }
        if self.model_name.trim().is_empty() {
            return Err(SemanticError::InvalidConfig(
                "model_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            model_name: "feature-hash-v1".into(),
            dimension: DEFAULT_DIMENSION,
            parallel: true,
            max_concurrency: 10,
            batch_pause: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = SemanticConfig::default();
        assert_eq!(cfg.model_name, "feature-hash-v1");
        assert_eq!(cfg.dimension, 384);
        assert!(cfg.parallel);
        assert_eq!(cfg.max_concurrency, 10);
        assert_eq!(cfg.batch_pause, Duration::from_millis(100));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn small_dimension_rejected() {
        let cfg = SemanticConfig {
            dimension: 14,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SemanticError::InvalidConfig(msg)) if msg.contains("dimension")
        ));

        let cfg = SemanticConfig {
            dimension: MIN_DIMENSION,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_concurrency_rejected() {
        let cfg = SemanticConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn batch_pause_serializes_as_millis() {
        let cfg = SemanticConfig {
            batch_pause: Duration::from_millis(250),
            ..Default::default()
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["batch_pause"], 250);

        let back: SemanticConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: SemanticConfig = serde_json::from_str(r#"{"dimension": 96}"#).unwrap();
        assert_eq!(cfg.dimension, 96);
        assert_eq!(cfg.max_concurrency, 10);
        assert!(cfg.parallel);
    }
}
