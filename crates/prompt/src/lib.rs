//! Prompt templates for Quill.
//!
//! Provides the two prompts the pipeline depends on: the grounded answer
//! prompt and the tag proposal prompt, both rendered with Handlebars.

pub mod builder;
pub mod templates;

pub use builder::{answer_prompt, tag_prompt};
pub use templates::ANSWER_NOT_FOUND;
