//! Command handlers for the Quill CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod tags;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use tags::TagsCommand;
