//! Nearest-neighbor document retrieval.
//!
//! Embeds the question and every workspace document, then selects the single
//! closest document by squared L2 distance. k is fixed at 1: downstream
//! synthesis grounds its answer in exactly one document.

use crate::embeddings::EmbeddingProvider;
use crate::index::FlatIndex;
use crate::types::{Document, RetrievedDocument};
use quill_core::{AppError, AppResult};
use std::sync::Arc;

/// Selects the best-matching document for a question.
#[derive(Debug)]
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Create a retriever over the given embedding provider.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Find the single nearest document to the question.
    ///
    /// The result is always one of the input documents. Ties on distance
    /// resolve to the earliest position, so retrieval is deterministic for a
    /// fixed embedding provider.
    pub async fn retrieve_best(
        &self,
        documents: &[Document],
        question: &str,
    ) -> AppResult<RetrievedDocument> {
        if documents.is_empty() {
            return Err(AppError::EmptyWorkspace("no documents".to_string()));
        }

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();

        let (document_vectors, question_vector) = futures::try_join!(
            self.provider.embed_batch(&texts),
            self.provider.embed(question)
        )?;

        let index = FlatIndex::build(document_vectors)?;
        let hits = index.nearest(&question_vector, 1)?;
        let (position, distance) = hits
            .first()
            .copied()
            .ok_or_else(|| AppError::Embedding("empty search result".to_string()))?;

        let best = &documents[position];
        tracing::debug!(
            "Retrieved '{}' at distance {:.4} for question",
            best.name,
            distance
        );

        Ok(RetrievedDocument {
            filename: best.name.clone(),
            content: best.content.clone(),
            distance,
        })
    }
}
