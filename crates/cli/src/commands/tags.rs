//! Tags command handler.
//!
//! Generates up to five tags for a single file.

use clap::Args;
use quill_core::{config::AppConfig, AppError, AppResult};
use quill_engine::{create_provider, QaService};
use quill_llm::create_client;
use std::path::PathBuf;

/// Generate tags for a file
#[derive(Args, Debug)]
pub struct TagsCommand {
    /// File to generate tags for
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TagsCommand {
    /// Execute the tags command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing tags command");

        let content = std::fs::read_to_string(&self.file)?;
        let filename = self
            .file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AppError::Validation(format!("{:?} has no filename", self.file)))?;

        let embedder = create_provider(&config.embedding, config.endpoint.as_deref())?;
        let llm = create_client(&config.provider, config.endpoint.as_deref())?;
        let service = QaService::new(embedder, llm, &config.model);

        let tags = service.generate_tags(&filename, &content).await?;

        if self.json {
            let output = serde_json::json!({ "tags": tags });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", tags.join(", "));
        }

        Ok(())
    }
}
