//! Resume marker stores

use crate::domain::repositories::{PositionMarker, PositionStore, RepositoryError};
use crate::domain::value_objects::{NodeId, StoryId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// One `<story>.position.json` file per story
pub struct JsonPositionStore {
    base_path: PathBuf,
}

impl JsonPositionStore {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_marker_path(&self, story_id: &StoryId) -> PathBuf {
        self.base_path
            .join(format!("{}.position.json", story_id.as_str()))
    }
}

#[async_trait]
impl PositionStore for JsonPositionStore {
    async fn load_position(&self, story_id: &StoryId) -> Result<Option<NodeId>, RepositoryError> {
        let path = self.get_marker_path(story_id);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::IoError {
                    message: format!("Failed to read marker {}: {}", path.display(), e),
                });
            }
        };

        let marker: PositionMarker =
            serde_json::from_str(&content).map_err(|e| RepositoryError::SerializationError {
                message: format!("Failed to deserialize marker {}: {}", path.display(), e),
            })?;

        if marker.story_id != *story_id {
            return Err(RepositoryError::SerializationError {
                message: format!(
                    "Marker {} belongs to story {}",
                    path.display(),
                    marker.story_id
                ),
            });
        }

        Ok(Some(marker.node_id))
    }

    async fn save_position(
        &self,
        story_id: &StoryId,
        node_id: &NodeId,
    ) -> Result<(), RepositoryError> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| RepositoryError::IoError {
                message: format!("Failed to create save directory: {e}"),
            })?;

        let marker = PositionMarker {
            story_id: story_id.clone(),
            node_id: node_id.clone(),
        };
        let json = serde_json::to_string_pretty(&marker).map_err(|e| {
            RepositoryError::SerializationError {
                message: format!("Failed to serialize marker: {e}"),
            }
        })?;

        let path = self.get_marker_path(story_id);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| RepositoryError::IoError {
                message: format!("Failed to write marker {}: {}", path.display(), e),
            })
    }
}

/// In-memory implementation for testing and for sessions without persistence
#[derive(Default)]
pub struct InMemoryPositionStore {
    positions: Mutex<HashMap<StoryId, NodeId>>,
}

impl InMemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(self, story_id: impl Into<StoryId>, node_id: impl Into<NodeId>) -> Self {
        self.positions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(story_id.into(), node_id.into());
        self
    }

    pub fn get(&self, story_id: &StoryId) -> Option<NodeId> {
        self.positions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(story_id)
            .cloned()
    }
}

#[async_trait]
impl PositionStore for InMemoryPositionStore {
    async fn load_position(&self, story_id: &StoryId) -> Result<Option<NodeId>, RepositoryError> {
        Ok(self.get(story_id))
    }

    async fn save_position(
        &self,
        story_id: &StoryId,
        node_id: &NodeId,
    ) -> Result<(), RepositoryError> {
        self.positions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(story_id.clone(), node_id.clone());
        Ok(())
    }
}
