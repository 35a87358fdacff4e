//! Question-answering service facade.
//!
//! Wires the workspace store, retriever, and synthesizers into the three
//! operations callers use: update a workspace, ask a question, and generate
//! tags. All validation happens at this boundary so the inner components can
//! assume well-formed input.

use crate::answer::AnswerSynthesizer;
use crate::embeddings::EmbeddingProvider;
use crate::retrieval::Retriever;
use crate::store::WorkspaceStore;
use crate::tags::TagSynthesizer;
use crate::types::{AskResponse, Document};
use quill_core::{AppError, AppResult};
use quill_llm::LlmClient;
use std::sync::Arc;

/// Workspace-scoped question answering and tagging.
pub struct QaService {
    store: WorkspaceStore,
    retriever: Retriever,
    answerer: AnswerSynthesizer,
    tagger: TagSynthesizer,
}

impl QaService {
    /// Create a service over the given embedding provider and LLM client.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            store: WorkspaceStore::new(),
            retriever: Retriever::new(embedder),
            answerer: AnswerSynthesizer::new(llm.clone(), model.clone()),
            tagger: TagSynthesizer::new(llm, model),
        }
    }

    /// Replace the full file set of a workspace.
    pub fn update_workspace(&self, workspace_id: &str, files: Vec<Document>) -> AppResult<()> {
        self.store.update(workspace_id, files)
    }

    /// Answer a question against a workspace's current documents.
    pub async fn ask(&self, workspace_id: &str, question: &str) -> AppResult<AskResponse> {
        if workspace_id.is_empty() {
            return Err(AppError::Validation(
                "workspace_id must not be empty".to_string(),
            ));
        }

        if question.trim().is_empty() {
            return Err(AppError::Validation(
                "question must not be empty".to_string(),
            ));
        }

        let documents = self.store.snapshot(workspace_id)?;
        if documents.is_empty() {
            return Err(AppError::EmptyWorkspace(workspace_id.to_string()));
        }

        tracing::info!(
            "Answering question against workspace '{}' ({} documents)",
            workspace_id,
            documents.len()
        );

        let best = self.retriever.retrieve_best(&documents, question).await?;
        let answer = self.answerer.answer(question, &best.content).await?;

        Ok(AskResponse {
            question: question.to_string(),
            answer,
            source_filename: best.filename,
            context_used: best.content,
        })
    }

    /// Generate up to five tags for a named file's content.
    pub async fn generate_tags(&self, filename: &str, content: &str) -> AppResult<Vec<String>> {
        self.tagger.synthesize(filename, content).await
    }
}
