//! Prompt builder for rendering the built-in templates.

use crate::templates::{ANSWER_TEMPLATE, TAG_TEMPLATE};
use handlebars::Handlebars;
use quill_core::{AppError, AppResult};
use std::collections::HashMap;

/// Build the grounded answer prompt for a (question, context) pair.
pub fn answer_prompt(question: &str, context: &str) -> AppResult<String> {
    tracing::debug!("Building answer prompt");

    let mut variables = HashMap::new();
    variables.insert("question".to_string(), question.to_string());
    variables.insert("context".to_string(), context.to_string());

    render_template(ANSWER_TEMPLATE, &variables)
}

/// Build the tag proposal prompt for a named file and content excerpt.
pub fn tag_prompt(filename: &str, excerpt: &str) -> AppResult<String> {
    tracing::debug!("Building tag prompt for '{}'", filename);

    let mut variables = HashMap::new();
    variables.insert("filename".to_string(), filename.to_string());
    variables.insert("excerpt".to_string(), excerpt.to_string());

    render_template(TAG_TEMPLATE, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Config(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Config(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
