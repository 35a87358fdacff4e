//! Tag synthesis.
//!
//! Combines two strategies: a statistical pass that picks the most frequent
//! non-stop-word keywords from the full content, and a generative pass that
//! asks the model for tags over a short excerpt. Statistical tags always come
//! first; a generative failure degrades to statistical-only output instead of
//! failing the request.

use quill_core::{AppError, AppResult};
use quill_llm::{LlmClient, LlmRequest};
use quill_prompt::tag_prompt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Maximum number of tags returned.
const MAX_TAGS: usize = 5;

/// Number of keywords the statistical strategy contributes.
const TOP_KEYWORDS: usize = 10;

/// Minimum character length for a keyword or normalized tag.
const MIN_TAG_LEN: usize = 3;

/// Leading slice of content handed to the generative strategy.
const EXCERPT_CHARS: usize = 500;

/// Token cap for the generative strategy.
const TAG_MAX_TOKENS: u32 = 100;

/// Frequent English words that make poor tags.
const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
];

/// Produces tags for a named document.
pub struct TagSynthesizer {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl TagSynthesizer {
    /// Create a synthesizer using the given client and model.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Generate up to five tags for the given file.
    ///
    /// Statistical keywords lead, generative tags fill the remaining slots.
    pub async fn synthesize(&self, filename: &str, content: &str) -> AppResult<Vec<String>> {
        if content.is_empty() {
            return Err(AppError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        let statistical = extract_keywords(content);

        let generative = match self.propose_tags(filename, content).await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!("Generative tagging failed, using keywords only: {}", e);
                Vec::new()
            }
        };

        Ok(merge_tags(statistical, generative))
    }

    /// Ask the model for candidate tags over a content excerpt.
    async fn propose_tags(&self, filename: &str, content: &str) -> AppResult<Vec<String>> {
        let excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
        let prompt = tag_prompt(filename, &excerpt)?;

        let request = LlmRequest::new(prompt, &self.model)
            .with_max_tokens(TAG_MAX_TOKENS)
            .deterministic();

        let response = self.client.complete(&request).await?;

        Ok(response
            .content
            .split(',')
            .filter_map(normalize_tag)
            .collect())
    }
}

/// Most frequent non-stop-word keywords, in descending frequency.
///
/// Frequency ties keep first-occurrence order in the text.
fn extract_keywords(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();
    let words = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TAG_LEN && !STOP_WORDS.contains(w));

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for word in words {
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(TOP_KEYWORDS);

    order.into_iter().map(|w| w.to_string()).collect()
}

/// Normalize a raw tag candidate into slug form.
///
/// Lowercases, strips everything but ASCII alphanumerics, whitespace, and
/// hyphens, then joins the remaining words with single hyphens. Candidates
/// shorter than three characters after normalization are dropped.
fn normalize_tag(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let slug = cleaned.split_whitespace().collect::<Vec<_>>().join("-");

    if slug.chars().count() >= MIN_TAG_LEN {
        Some(slug)
    } else {
        None
    }
}

/// Merge the two strategies' outputs, statistical first, deduped, capped.
fn merge_tags(statistical: Vec<String>, generative: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<String> = Vec::new();

    for tag in statistical.into_iter().chain(generative) {
        if merged.len() == MAX_TAGS {
            break;
        }
        if seen.insert(tag.clone()) {
            merged.push(tag);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::AppResult;
    use quill_llm::{LlmResponse, LlmUsage};

    struct CannedClient {
        content: String,
    }

    #[async_trait::async_trait]
    impl LlmClient for CannedClient {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: self.content.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    struct FailingClient;

    #[async_trait::async_trait]
    impl LlmClient for FailingClient {
        fn provider_name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
            Err(AppError::Generation("model unavailable".to_string()))
        }
    }

    fn synthesizer(content: &str) -> TagSynthesizer {
        TagSynthesizer::new(
            Arc::new(CannedClient {
                content: content.to_string(),
            }),
            "test-model",
        )
    }

    #[test]
    fn test_extract_keywords_frequency_order() {
        let keywords = extract_keywords("rust rust rust tokio tokio serde");
        assert_eq!(keywords, vec!["rust", "tokio", "serde"]);
    }

    #[test]
    fn test_extract_keywords_skips_stop_words_and_short() {
        let keywords = extract_keywords("the cat and a big ox on it");
        assert_eq!(keywords, vec!["cat", "big"]);
    }

    #[test]
    fn test_extract_keywords_tie_keeps_text_order() {
        let keywords = extract_keywords("zebra apple zebra apple mango");
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_extract_keywords_caps_at_ten() {
        let content = "one1 two2 three3 four4 five5 six6 seven7 eight8 nine9 ten10 eleven11 twelve12";
        assert_eq!(extract_keywords(content).len(), 10);
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag(" Machine Learning "), Some("machine-learning".to_string()));
        assert_eq!(normalize_tag("C++!"), None);
        assert_eq!(normalize_tag("ok"), None);
        assert_eq!(normalize_tag("Self-Hosted"), Some("self-hosted".to_string()));
        assert_eq!(normalize_tag("data_base"), Some("database".to_string()));
    }

    #[test]
    fn test_merge_dedupes_and_caps() {
        let merged = merge_tags(
            vec!["rust".into(), "tokio".into()],
            vec!["rust".into(), "async".into(), "serde".into(), "http".into(), "json".into()],
        );
        assert_eq!(merged, vec!["rust", "tokio", "async", "serde", "http"]);
    }

    #[tokio::test]
    async fn test_synthesize_merges_both_strategies() {
        let s = synthesizer("Async Runtime, Networking");
        let tags = s
            .synthesize("notes.txt", "tokio tokio runtime")
            .await
            .unwrap();
        assert_eq!(tags, vec!["tokio", "runtime", "async-runtime", "networking"]);
    }

    #[tokio::test]
    async fn test_generative_failure_degrades_to_keywords() {
        let s = TagSynthesizer::new(Arc::new(FailingClient), "test-model");
        let tags = s
            .synthesize("notes.txt", "rust rust tokio")
            .await
            .unwrap();
        assert_eq!(tags, vec!["rust", "tokio"]);
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let s = synthesizer("anything");
        let result = s.synthesize("notes.txt", "").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_stop_word_only_content_yields_generative_tags() {
        let s = synthesizer("History, Fiction");
        let tags = s.synthesize("notes.txt", "the and of").await.unwrap();
        assert_eq!(tags, vec!["history", "fiction"]);
    }
}
