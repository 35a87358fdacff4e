//! Deterministic local embedding provider.
//!
//! Hashes word and character-trigram features into a fixed-dimension vector.
//! No model download, no network, identical input always produces the
//! identical vector, which keeps retrieval reproducible across processes.

use crate::embeddings::provider::EmbeddingProvider;
use quill_core::AppResult;

/// Common English stop words excluded from whole-word features.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "it", "its",
];

/// Hash-based text embedding provider.
#[derive(Debug)]
pub struct TrigramProvider {
    model: String,
    dimensions: usize,
}

impl TrigramProvider {
    /// Create a provider emitting vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            model: "trigram-v1".to_string(),
            dimensions,
        }
    }

    /// Embed a single text into a unit-length vector.
    ///
    /// Empty or stop-word-only text maps to the zero vector.
    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();

        for token in &tokens {
            let chars: Vec<char> = token.chars().collect();

            // Character trigrams capture partial matches between word forms.
            if chars.len() >= 3 {
                let mut counts: std::collections::HashMap<u64, u32> =
                    std::collections::HashMap::new();
                for window in chars.windows(3) {
                    *counts.entry(hash_chars(window, 37)).or_insert(0) += 1;
                }
                for (hash, count) in counts {
                    let slot = (hash % self.dimensions as u64) as usize;
                    vector[slot] += (count as f32).sqrt();
                }
            }

            // Whole-word feature, skipping stop words.
            if !STOP_WORDS.contains(&token.as_str()) {
                let slot = (hash_chars(&chars, 31) % self.dimensions as u64) as usize;
                vector[slot] += 1.0;
            }
        }

        normalize(&mut vector);
        vector
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

/// FNV-style rolling hash over a character sequence.
fn hash_chars(chars: &[char], seed: u64) -> u64 {
    let mut hash: u64 = 1469598103934665603;
    for &c in chars {
        hash ^= c as u64;
        hash = hash.wrapping_mul(seed.wrapping_mul(3212938581) | 1);
    }
    hash
}

/// Scale a vector to unit length in place; the zero vector is left as-is.
fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}
