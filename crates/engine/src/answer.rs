//! Grounded answer synthesis.
//!
//! Feeds the retrieved document and the question to the generative model with
//! deterministic decoding, then applies a lexical grounding check: the
//! candidate answer must appear verbatim (case-insensitive) in the document
//! text, otherwise the sentinel is returned instead. The check only ever
//! replaces the candidate, never edits it.

use quill_core::AppResult;
use quill_llm::{LlmClient, LlmRequest};
use quill_prompt::{answer_prompt, ANSWER_NOT_FOUND};
use std::sync::Arc;

/// Answer length cap: answers are extractive spans, not essays.
const ANSWER_MAX_TOKENS: u32 = 50;

/// Produces grounded answers from a single context document.
pub struct AnswerSynthesizer {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl AnswerSynthesizer {
    /// Create a synthesizer using the given client and model.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Answer a question using only the given context.
    pub async fn answer(&self, question: &str, context: &str) -> AppResult<String> {
        let prompt = answer_prompt(question, context)?;

        let request = LlmRequest::new(prompt, &self.model)
            .with_max_tokens(ANSWER_MAX_TOKENS)
            .deterministic();

        let response = self.client.complete(&request).await?;
        let candidate = response.content.trim().to_string();

        if is_grounded(&candidate, context) {
            Ok(candidate)
        } else {
            tracing::debug!("Candidate answer not present in context, returning sentinel");
            Ok(ANSWER_NOT_FOUND.to_string())
        }
    }
}

/// Whether the candidate appears verbatim in the context, ignoring case.
fn is_grounded(candidate: &str, context: &str) -> bool {
    context
        .to_lowercase()
        .contains(&candidate.to_lowercase())
}
