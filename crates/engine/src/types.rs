//! Shared types for the question-answering engine.

use serde::{Deserialize, Serialize};

/// A named document inside a workspace.
///
/// Filenames are unique within a workspace; the store collapses duplicates
/// on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Filename, unique within the workspace
    pub name: String,

    /// Full document text
    pub content: String,
}

impl Document {
    /// Create a new document.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The single best document selected for a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Filename of the selected document
    pub filename: String,

    /// Full content of the selected document
    pub content: String,

    /// Squared Euclidean distance between the question vector and the
    /// document vector. Exposed for diagnostics only.
    pub distance: f32,
}

/// Response for an `ask` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The question that was asked
    pub question: String,

    /// The grounded answer (or the "Answer not found." sentinel)
    pub answer: String,

    /// Filename of the document the answer was extracted from
    pub source_filename: String,

    /// The document content handed to the generative capability
    pub context_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_response_serialization() {
        let response = AskResponse {
            question: "What sat on the mat?".to_string(),
            answer: "The cat".to_string(),
            source_filename: "a.txt".to_string(),
            context_used: "The cat sat on the mat.".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["source_filename"], "a.txt");
        assert_eq!(json["answer"], "The cat");

        let roundtrip: AskResponse = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip.question, response.question);
    }
}
