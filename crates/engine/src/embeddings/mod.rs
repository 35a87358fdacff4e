//! Text embedding.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
