//! Flat similarity index.
//!
//! Exact brute-force nearest-neighbor search over a small set of vectors
//! using squared Euclidean (L2) distance. Workspaces hold tens of documents,
//! not millions, so a linear scan is both sufficient and simpler than any
//! approximate index structure. The index is rebuilt per request because
//! workspace content may change between requests and there is no
//! invalidation signal.

use quill_core::{AppError, AppResult};

/// Brute-force vector index over squared L2 distance.
#[derive(Debug)]
pub struct FlatIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index over a set of vectors.
    ///
    /// All vectors must share the same dimensionality; positions are
    /// preserved so results can be mapped back to the caller's ordering.
    pub fn build(vectors: Vec<Vec<f32>>) -> AppResult<Self> {
        let dimensions = vectors
            .first()
            .map(|v| v.len())
            .ok_or_else(|| AppError::Embedding("cannot index zero vectors".to_string()))?;

        if let Some(position) = vectors.iter().position(|v| v.len() != dimensions) {
            return Err(AppError::Embedding(format!(
                "vector at position {} has {} dimensions, expected {}",
                position,
                vectors[position].len(),
                dimensions
            )));
        }

        Ok(Self {
            dimensions,
            vectors,
        })
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimensionality of the indexed vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Find the k nearest vectors to the query.
    ///
    /// Returns (position, squared L2 distance) pairs ordered by ascending
    /// distance. Equidistant vectors keep their original positional order,
    /// so the first minimum found by a linear scan always wins ties.
    pub fn nearest(&self, query: &[f32], k: usize) -> AppResult<Vec<(usize, f32)>> {
        if query.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .map(|v| squared_l2(query, v))
            .enumerate()
            .collect();

        // Stable sort keeps positional order among equal distances.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        Ok(scored)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
