//! Document sources backed by the file system or memory

use crate::domain::errors::SourceError;
use crate::domain::repositories::DocumentSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Reads JSON documents relative to a content root
pub struct FileSystemDocumentSource {
    base_path: PathBuf,
}

impl FileSystemDocumentSource {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let relative = path.trim().trim_start_matches("./").trim_start_matches('/');
        self.base_path.join(relative)
    }
}

#[async_trait]
impl DocumentSource for FileSystemDocumentSource {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, SourceError> {
        let full = self.resolve(path);

        let content = match tokio::fs::read_to_string(&full).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::not_found(path));
            }
            Err(e) => {
                return Err(SourceError::io(
                    path,
                    format!("{}: {}", full.display(), e),
                ));
            }
        };

        serde_json::from_str(&content).map_err(|e| SourceError::parse(path, e.to_string()))
    }
}

/// In-memory implementation for testing
///
/// Documents are stored as text so that malformed JSON can be served too.
#[derive(Default)]
pub struct InMemoryDocumentSource {
    documents: Mutex<HashMap<String, String>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<String>, document: serde_json::Value) {
        self.insert_raw(path, document.to_string());
    }

    pub fn insert_raw(&self, path: impl Into<String>, text: impl Into<String>) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), text.into());
    }

    pub fn with_document(self, path: impl Into<String>, document: serde_json::Value) -> Self {
        self.insert(path, document);
        self
    }

    /// How many times `path` has been fetched
    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentSource for InMemoryDocumentSource {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, SourceError> {
        *self
            .fetches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(path.to_string())
            .or_default() += 1;

        let text = self
            .documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::not_found(path))?;

        serde_json::from_str(&text).map_err(|e| SourceError::parse(path, e.to_string()))
    }
}
