//! Ask command handler.
//!
//! Loads a directory of text files into an in-memory workspace and answers a
//! question against it.

use clap::Args;
use quill_core::{config::AppConfig, AppError, AppResult};
use quill_engine::{create_provider, AskResponse, Document, QaService};
use quill_llm::create_client;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ask a question over a directory of documents
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Directory of text files to answer from
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Workspace identifier
    #[arg(short, long, default_value = "default")]
    pub workspace: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let files = load_documents(&self.dir)?;
        tracing::info!("Loaded {} documents from {:?}", files.len(), self.dir);

        let embedder = create_provider(&config.embedding, config.endpoint.as_deref())?;
        let llm = create_client(&config.provider, config.endpoint.as_deref())?;
        let service = QaService::new(embedder, llm, &config.model);

        service.update_workspace(&self.workspace, files)?;
        let response = service.ask(&self.workspace, &self.question).await?;

        if self.json {
            println!("{}", render_json(&response)?);
        } else {
            println!("{}", response.answer);
            tracing::debug!("Answer sourced from '{}'", response.source_filename);
        }

        Ok(())
    }
}

/// Render a response as pretty JSON with the engine's field names.
fn render_json(response: &AskResponse) -> AppResult<String> {
    serde_json::to_string_pretty(response).map_err(|e| AppError::Serialization(e.to_string()))
}

/// Read every regular file under a directory into named documents.
///
/// Document names are paths relative to the root; files that are not valid
/// UTF-8 are skipped with a warning.
fn load_documents(root: &Path) -> AppResult<Vec<Document>> {
    if !root.is_dir() {
        return Err(AppError::Validation(format!(
            "{:?} is not a directory",
            root
        )));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.map_err(|e| AppError::Validation(format!("Failed to walk {:?}: {}", root, e)))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .to_string();

        match std::fs::read_to_string(entry.path()) {
            Ok(content) => documents.push(Document::new(name, content)),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", entry.path(), e);
            }
        }
    }

    if documents.is_empty() {
        return Err(AppError::Validation(format!(
            "No readable text files under {:?}",
            root
        )));
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_documents_reads_files() {
        let dir = std::env::temp_dir().join("quill-ask-test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.txt"), "alpha").unwrap();
        std::fs::write(dir.join("b.txt"), "beta").unwrap();

        let documents = load_documents(&dir).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].name, "a.txt");
        assert_eq!(documents[0].content, "alpha");
    }

    #[test]
    fn test_json_output_matches_engine_field_names() {
        let response = AskResponse {
            question: "What sat on the mat?".to_string(),
            answer: "The cat".to_string(),
            source_filename: "a.txt".to_string(),
            context_used: "The cat sat on the mat.".to_string(),
        };

        let json = render_json(&response).unwrap();
        assert!(json.contains("\"source_filename\""));
        assert!(json.contains("\"context_used\""));
        assert!(!json.contains("sourceFilename"));
    }

    #[test]
    fn test_load_documents_rejects_missing_dir() {
        let result = load_documents(Path::new("/nonexistent/quill-test"));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
