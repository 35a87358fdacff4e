//! Ollama embedding provider.

use crate::embeddings::provider::EmbeddingProvider;
use quill_core::{AppError, AppResult, EmbeddingSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    embedding: Vec<f32>,
}

/// Embedding provider backed by a local Ollama server.
#[derive(Debug)]
pub struct OllamaProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a provider from embedding settings and an optional endpoint.
    pub fn new(settings: &EmbeddingSettings, endpoint: Option<&str>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Embedding(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: endpoint.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            client,
        })
    }

    async fn embed_once(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Embedding(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let parsed: OllamaEmbedResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Invalid Ollama response: {}", e)))?;

        Ok(parsed.embedding)
    }

    async fn embed_with_retry(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match self.embed_once(text).await {
                Ok(embedding) => return Ok(embedding),
                Err(e) => {
                    tracing::warn!(
                        "Embedding attempt {}/{} failed: {}",
                        attempt + 1,
                        MAX_RETRIES,
                        e
                    );
                    last_error = Some(e);
                    if attempt + 1 < MAX_RETRIES {
                        tokio::time::sleep(Duration::from_millis(200 * 2u64.pow(attempt))).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::Embedding("embedding failed".to_string())))
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());

        for text in texts {
            if text.is_empty() {
                // Ollama rejects empty prompts; keep positional alignment.
                results.push(vec![0.0; self.dimensions]);
                continue;
            }
            results.push(self.embed_with_retry(text).await?);
        }

        Ok(results)
    }
}
