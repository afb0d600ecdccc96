//! Domain repository traits - Abstractions over documents, the catalog and saved positions

use crate::domain::errors::SourceError;
use crate::domain::value_objects::{NodeId, StoryId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source of JSON documents (registry, hitboxes, catalog, stories)
///
/// Every call is a suspension point; implementations decide whether paths
/// are files, URLs or in-memory keys.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch and decode the document at `path`
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, SourceError>;
}

/// Where a story's JSON lives, as resolved by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryLocator {
    pub story_id: StoryId,
    pub pack_id: String,
    pub root: String,
    pub story_json_url: String,
    pub cover_url: String,
}

/// Catalog lookup from story id to story source
#[async_trait]
pub trait StoryCatalog: Send + Sync {
    /// Load the catalog ahead of the first lookup
    async fn preload(&self) -> Result<(), SourceError>;

    /// Resolve a story id; `None` means the story must not be mounted
    async fn resolve_story(&self, story_id: &StoryId) -> Option<StoryLocator>;
}

/// Persisted per-story resume marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMarker {
    pub story_id: StoryId,
    pub node_id: NodeId,
}

/// Repository for resume markers
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Load the last saved node for a story
    async fn load_position(&self, story_id: &StoryId) -> Result<Option<NodeId>, RepositoryError>;

    /// Save the current node for a story
    async fn save_position(&self, story_id: &StoryId, node_id: &NodeId)
    -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    #[error("Repository unavailable: {reason}")]
    Unavailable { reason: String },
}
