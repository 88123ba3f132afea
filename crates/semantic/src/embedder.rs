//! Deterministic feature-hashing embedder.
//!
//! This is not a language model. It maps a sentence onto four bands of a
//! fixed-width vector so that sentences sharing words and character
//! trigrams end up with a higher cosine similarity:
//!
//! | slots | content |
//! |---|---|
//! | `[0, B)` | bag of words, `freq / total_words` at `hash(word) % B` |
//! | `[B, 2B)` | character trigrams, `1 / total_trigrams` at `B + hash(tri) % B` |
//! | `[2B, 2B + 5)` | length, word count, letter ratio, digit ratio, long-word ratio |
//! | `[2B + 5, D)` | code point of the i-th character, scaled down |
//!
//! where `D` is the configured dimension and `B = D / 3`. The whole vector
//! is L2-normalized at the end.
//!
//! Paraphrases with no shared vocabulary score low. That is a known
//! limitation of the approach, not something this module tries to paper over.

use std::collections::HashMap;

use async_trait::async_trait;
use rayon::prelude::*;
use tracing::warn;

use crate::config::SemanticConfig;
use crate::error::SemanticError;
use crate::normalize::{ensure_finite, l2_normalize_in_place};
use crate::provider::EmbeddingProvider;

const STATS_SLOTS: usize = 5;
const LENGTH_SCALE: f32 = 1000.0;
const WORD_COUNT_SCALE: f32 = 100.0;
const ORDINAL_SCALE: f32 = 1000.0;
/// Words with more characters than this count as "long".
const LONG_WORD_CHARS: usize = 5;

/// 32-bit polynomial rolling hash (`h = h * 31 + c`, wrapping), returned as
/// the absolute value of the signed result.
///
/// Runs over Unicode scalar values. `i32::MIN` maps to `2^31` rather than
/// overflowing.
pub fn rolling_hash(s: &str) -> u32 {
    let mut h: i32 = 0;
    for ch in s.chars() {
        h = h.wrapping_mul(31).wrapping_add(ch as u32 as i32);
    }
    h.unsigned_abs()
}

/// Local embedder. Cheap to clone, holds no mutable state.
#[derive(Debug, Clone)]
pub struct FeatureEmbedder {
    model_name: String,
    dimension: usize,
    parallel: bool,
}

impl FeatureEmbedder {
    pub fn new(cfg: &SemanticConfig) -> Result<Self, SemanticError> {
        cfg.validate()?;
        Ok(Self {
            model_name: cfg.model_name.clone(),
            dimension: cfg.dimension,
            parallel: cfg.parallel,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Embeds one sentence. Never fails: an anomalous vector is logged and
    /// replaced by zeros.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = self.features(text);
        l2_normalize_in_place(&mut vector);
        match ensure_finite(&vector) {
            Ok(()) => vector,
            Err(err) => {
                warn!(error = %err, "feature embedding degraded to zero vector");
                vec![0.0; self.dimension]
            }
        }
    }

    /// Embeds a batch. Output order matches input order whether or not the
    /// work is spread over the rayon pool.
    pub fn embed_all<S>(&self, texts: &[S]) -> Vec<Vec<f32>>
    where
        S: AsRef<str> + Sync,
    {
        if self.parallel && texts.len() > 1 {
            texts.par_iter().map(|t| self.embed(t.as_ref())).collect()
        } else {
            texts.iter().map(|t| self.embed(t.as_ref())).collect()
        }
    }

    fn features(&self, text: &str) -> Vec<f32> {
        let dim = self.dimension;
        let band = dim / 3;
        let stats = 2 * band;
        let mut v = vec![0f32; dim];

        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let normalized = words.join(" ");
        let chars: Vec<char> = normalized.chars().collect();

        // Band A. Distinct words are visited in first-occurrence order so the
        // float accumulation order is fixed.
        if !words.is_empty() {
            let total = words.len() as f32;
            let mut slot_of: HashMap<&str, usize> = HashMap::with_capacity(words.len());
            let mut counts: Vec<(&str, usize)> = Vec::new();
            for &word in &words {
                match slot_of.get(word) {
                    Some(&idx) => counts[idx].1 += 1,
                    None => {
                        slot_of.insert(word, counts.len());
                        counts.push((word, 1));
                    }
                }
            }
            for (word, count) in counts {
                v[rolling_hash(word) as usize % band] += count as f32 / total;
            }
        }

        // Band B.
        if chars.len() >= 3 {
            let weight = 1.0 / (chars.len() - 2) as f32;
            let mut trigram = String::with_capacity(12);
            for window in chars.windows(3) {
                trigram.clear();
                trigram.extend(window);
                v[band + rolling_hash(&trigram) as usize % band] += weight;
            }
        }

        // Band C.
        let char_count = chars.len();
        v[stats] = char_count as f32 / LENGTH_SCALE;
        v[stats + 1] = words.len() as f32 / WORD_COUNT_SCALE;
        if char_count > 0 {
            let letters = chars.iter().filter(|c| c.is_alphabetic()).count();
            let digits = chars.iter().filter(|c| c.is_ascii_digit()).count();
            v[stats + 2] = letters as f32 / char_count as f32;
            v[stats + 3] = digits as f32 / char_count as f32;
        }
        if !words.is_empty() {
            let long = words
                .iter()
                .filter(|w| w.chars().count() > LONG_WORD_CHARS)
                .count();
            v[stats + 4] = long as f32 / words.len() as f32;
        }

        // Ordinals fill whatever is left.
        let ordinals = stats + STATS_SLOTS;
        for (slot, ch) in v[ordinals..].iter_mut().zip(chars.iter()) {
            *slot = *ch as u32 as f32 / ORDINAL_SCALE;
        }

        v
    }
}

#[async_trait]
impl EmbeddingProvider for FeatureEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dims(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        Ok(FeatureEmbedder::embed(self, text))
    }
}
