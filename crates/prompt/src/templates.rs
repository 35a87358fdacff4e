//! Built-in prompt templates.
//!
//! These two templates are fixed contracts of the pipeline: the grounded
//! answer synthesizer depends on the sentinel phrase and the
//! answer-from-context instructions, and the tag synthesizer depends on the
//! comma-separated output format.

/// Sentinel phrase returned when the context does not contain the answer.
///
/// The grounding filter also substitutes this phrase whenever the generated
/// candidate is not literally supported by the context.
pub const ANSWER_NOT_FOUND: &str = "Answer not found.";

/// Template for the grounded answer prompt.
///
/// Directs the model to answer strictly from the supplied context, to emit
/// the sentinel when the context lacks the answer, and to stay concise.
pub const ANSWER_TEMPLATE: &str = "\
Context:
{{context}}

Instructions:
- Use only the context to answer.
- If the answer is not present, say: 'Answer not found.'
- Be short and accurate.

Question: {{question}}
Answer:";

/// Template for the tag proposal prompt.
///
/// Asks for exactly five comma-separated tags for a named file given a
/// bounded excerpt of its content.
pub const TAG_TEMPLATE: &str = "\
Generate 5 relevant tags for a file named '{{filename}}' with the following \
content. Focus on the main topics and themes. Return only the tags separated \
by commas:

{{excerpt}}";
