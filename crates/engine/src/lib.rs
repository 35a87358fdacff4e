//! Quill engine: workspace storage, retrieval, and synthesis.
//!
//! The engine answers questions over small per-workspace document sets. A
//! question is embedded alongside every document, the nearest document is
//! selected by squared L2 distance, and the generative model produces an
//! answer that must survive a lexical grounding check. A separate pipeline
//! synthesizes tags from document content.

pub mod answer;
pub mod embeddings;
pub mod index;
pub mod retrieval;
pub mod service;
pub mod store;
pub mod tags;
pub mod types;


pub use embeddings::{create_provider, EmbeddingProvider};
pub use service::QaService;
pub use store::WorkspaceStore;
pub use types::{AskResponse, Document, RetrievedDocument};
