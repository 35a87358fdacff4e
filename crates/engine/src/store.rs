//! In-memory workspace store.
//!
//! Holds the current set of named documents per workspace identifier for the
//! lifetime of the process. Updates install a brand-new snapshot under the
//! lock (atomic swap), so concurrent readers always observe either the old or
//! the new file set in full, never a mix.

use crate::types::Document;
use quill_core::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-wide store of workspaces.
///
/// Workspaces are created on first update and never explicitly deleted.
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    workspaces: RwLock<HashMap<String, Arc<Vec<Document>>>>,
}

impl WorkspaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full file set of a workspace.
    ///
    /// This is a full overwrite, not a merge: after the call the workspace
    /// holds exactly the submitted documents. Duplicate filenames collapse to
    /// the last submitted content while keeping the first occurrence's
    /// position, mirroring mapping-insertion semantics.
    pub fn update(&self, workspace_id: &str, files: Vec<Document>) -> AppResult<()> {
        if workspace_id.is_empty() {
            return Err(AppError::Validation(
                "workspace_id must not be empty".to_string(),
            ));
        }

        if files.is_empty() {
            return Err(AppError::Validation(
                "files must not be empty".to_string(),
            ));
        }

        let mut documents: Vec<Document> = Vec::with_capacity(files.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(files.len());

        for file in files {
            match positions.get(&file.name) {
                Some(&position) => documents[position].content = file.content,
                None => {
                    positions.insert(file.name.clone(), documents.len());
                    documents.push(file);
                }
            }
        }

        tracing::info!(
            "Updating workspace '{}' with {} documents",
            workspace_id,
            documents.len()
        );

        // Install a fresh Arc so in-flight readers keep their old snapshot.
        let mut workspaces = self.workspaces.write().unwrap();
        workspaces.insert(workspace_id.to_string(), Arc::new(documents));

        Ok(())
    }

    /// Get an immutable snapshot of a workspace's documents.
    pub fn snapshot(&self, workspace_id: &str) -> AppResult<Arc<Vec<Document>>> {
        let workspaces = self.workspaces.read().unwrap();
        workspaces
            .get(workspace_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("workspace '{}'", workspace_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_snapshot() {
        let store = WorkspaceStore::new();
        store
            .update(
                "ws1",
                vec![
                    Document::new("a.txt", "alpha"),
                    Document::new("b.txt", "beta"),
                ],
            )
            .unwrap();

        let snapshot = store.snapshot("ws1").unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "a.txt");
        assert_eq!(snapshot[1].name, "b.txt");
    }

    #[test]
    fn test_update_is_full_overwrite() {
        let store = WorkspaceStore::new();
        store
            .update(
                "ws1",
                vec![
                    Document::new("a.txt", "alpha"),
                    Document::new("b.txt", "beta"),
                ],
            )
            .unwrap();
        store
            .update("ws1", vec![Document::new("c.txt", "gamma")])
            .unwrap();

        // No stale entries persist after a full overwrite
        let snapshot = store.snapshot("ws1").unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "c.txt");
    }

    #[test]
    fn test_duplicate_names_collapse_last_wins() {
        let store = WorkspaceStore::new();
        store
            .update(
                "ws1",
                vec![
                    Document::new("a.txt", "first"),
                    Document::new("b.txt", "beta"),
                    Document::new("a.txt", "second"),
                ],
            )
            .unwrap();

        let snapshot = store.snapshot("ws1").unwrap();
        assert_eq!(snapshot.len(), 2);
        // Last content wins, first position kept
        assert_eq!(snapshot[0].name, "a.txt");
        assert_eq!(snapshot[0].content, "second");
        assert_eq!(snapshot[1].name, "b.txt");
    }

    #[test]
    fn test_empty_workspace_id_rejected() {
        let store = WorkspaceStore::new();
        let result = store.update("", vec![Document::new("a.txt", "alpha")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_files_rejected() {
        let store = WorkspaceStore::new();
        let result = store.update("ws1", Vec::new());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unknown_workspace_not_found() {
        let store = WorkspaceStore::new();
        let result = store.snapshot("missing");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_snapshot_survives_later_update() {
        let store = WorkspaceStore::new();
        store
            .update("ws1", vec![Document::new("a.txt", "old")])
            .unwrap();

        let before = store.snapshot("ws1").unwrap();
        store
            .update("ws1", vec![Document::new("a.txt", "new")])
            .unwrap();

        // The earlier snapshot is immutable; the swap never mutates in place
        assert_eq!(before[0].content, "old");
        assert_eq!(store.snapshot("ws1").unwrap()[0].content, "new");
    }
}
