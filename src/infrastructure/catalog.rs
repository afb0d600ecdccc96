//! Story catalog implementations

use crate::domain::errors::SourceError;
use crate::domain::repositories::{DocumentSource, StoryCatalog, StoryLocator};
use crate::domain::value_objects::StoryId;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Pack-based catalog read from `catalog.json`
///
/// ```json
/// { "packs": [ { "packId": "founders", "root": "content/founders",
///                "stories": [ { "id": "timecop", "storyJson": "stories/timecop.json",
///                               "cover": "covers/timecop.webp" } ] } ] }
/// ```
///
/// A failed load leaves the catalog empty and is retried on the next lookup.
pub struct PackCatalog {
    source: Arc<dyn DocumentSource>,
    catalog_path: String,
    index: Mutex<Option<HashMap<StoryId, StoryLocator>>>,
}

impl PackCatalog {
    pub fn new(source: Arc<dyn DocumentSource>, catalog_path: impl Into<String>) -> Self {
        Self {
            source,
            catalog_path: catalog_path.into(),
            index: Mutex::new(None),
        }
    }

    pub fn catalog_path(&self) -> &str {
        &self.catalog_path
    }

    fn is_loaded(&self) -> bool {
        self.index
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

#[async_trait]
impl StoryCatalog for PackCatalog {
    async fn preload(&self) -> Result<(), SourceError> {
        if self.is_loaded() {
            return Ok(());
        }

        let doc = self.source.fetch_json(&self.catalog_path).await?;
        let index = build_index(&doc);
        log::info!("[catalog] indexed {} stories", index.len());
        *self.index.lock().unwrap_or_else(|e| e.into_inner()) = Some(index);
        Ok(())
    }

    async fn resolve_story(&self, story_id: &StoryId) -> Option<StoryLocator> {
        let id = story_id.as_str().trim();
        if id.is_empty() {
            return None;
        }

        if !self.is_loaded()
            && let Err(e) = self.preload().await
        {
            log::warn!("[catalog] failed to load {}: {}", self.catalog_path, e);
            return None;
        }

        self.index
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .and_then(|index| index.get(id).cloned())
    }
}

fn text_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn build_index(catalog: &Value) -> HashMap<StoryId, StoryLocator> {
    let mut index = HashMap::new();

    let packs = catalog
        .get("packs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    for pack in packs {
        let pack_id = text_field(pack, "packId");
        let root = text_field(pack, "root");
        let stories = pack
            .get("stories")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for story in stories {
            let id = text_field(story, "id").trim();
            if id.is_empty() {
                continue;
            }

            let story_json = text_field(story, "storyJson");
            let cover = text_field(story, "cover");

            index.insert(
                StoryId::from(id),
                StoryLocator {
                    story_id: StoryId::from(id),
                    pack_id: pack_id.to_string(),
                    root: root.to_string(),
                    story_json_url: if story_json.is_empty() {
                        String::new()
                    } else {
                        norm_join(root, story_json)
                    },
                    cover_url: if cover.is_empty() {
                        String::new()
                    } else {
                        norm_join(root, cover)
                    },
                },
            );
        }
    }

    index
}

/// Join two path segments with exactly one `/`
pub fn norm_join(left: &str, right: &str) -> String {
    let left = left.trim().trim_end_matches('/');
    let right = right.trim().trim_start_matches('/');
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left}/{right}"),
    }
}

/// Fixed catalog for tests and embedded content
#[derive(Default)]
pub struct StaticCatalog {
    stories: HashMap<StoryId, StoryLocator>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a story whose JSON lives at `story_json_url`
    pub fn with_story(mut self, story_id: &str, story_json_url: &str) -> Self {
        self.stories.insert(
            StoryId::from(story_id),
            StoryLocator {
                story_id: StoryId::from(story_id),
                pack_id: String::new(),
                root: String::new(),
                story_json_url: story_json_url.to_string(),
                cover_url: String::new(),
            },
        );
        self
    }
}

#[async_trait]
impl StoryCatalog for StaticCatalog {
    async fn preload(&self) -> Result<(), SourceError> {
        Ok(())
    }

    async fn resolve_story(&self, story_id: &StoryId) -> Option<StoryLocator> {
        self.stories.get(story_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::documents::InMemoryDocumentSource;
    use serde_json::json;

    #[test]
    fn norm_join_uses_one_separator() {
        assert_eq!(norm_join("content/founders/", "/stories/a.json"), "content/founders/stories/a.json");
        assert_eq!(norm_join("", "stories/a.json"), "stories/a.json");
        assert_eq!(norm_join("root", ""), "root");
    }

    #[tokio::test]
    async fn pack_catalog_resolves_derived_paths() {
        let source = Arc::new(InMemoryDocumentSource::new().with_document(
            "catalog.json",
            json!({
                "packs": [{
                    "packId": "founders",
                    "root": "./content/founders/packs/",
                    "stories": [
                        { "id": "timecop", "storyJson": "stories/timecop.json", "cover": "covers/timecop.webp" },
                        { "id": "", "storyJson": "stories/ignored.json" }
                    ]
                }]
            }),
        ));
        let catalog = PackCatalog::new(source.clone(), "catalog.json");

        let locator = catalog.resolve_story(&StoryId::from("timecop")).await.unwrap();
        assert_eq!(locator.pack_id, "founders");
        assert_eq!(
            locator.story_json_url,
            "./content/founders/packs/stories/timecop.json"
        );
        assert_eq!(locator.cover_url, "./content/founders/packs/covers/timecop.webp");

        assert!(catalog.resolve_story(&StoryId::from("missing")).await.is_none());
        assert_eq!(source.fetch_count("catalog.json"), 1);
    }

    #[tokio::test]
    async fn pack_catalog_retries_after_failed_load() {
        let source = Arc::new(InMemoryDocumentSource::new());
        let catalog = PackCatalog::new(source.clone(), "catalog.json");

        assert!(catalog.preload().await.is_err());
        assert!(catalog.resolve_story(&StoryId::from("a")).await.is_none());

        source.insert(
            "catalog.json",
            json!({ "packs": [{ "root": "r", "stories": [{ "id": "a", "storyJson": "a.json" }] }] }),
        );
        let locator = catalog.resolve_story(&StoryId::from("a")).await.unwrap();
        assert_eq!(locator.story_json_url, "r/a.json");
    }
}
