//! Application configuration

use crate::domain::value_objects::{AliasNames, NodeId, ScreenId, StoryId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ContentConfig::root`]
pub const CONTENT_ROOT_ENV: &str = "VERSECRAFT_CONTENT_ROOT";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Content locations
    pub content: ContentConfig,
    /// Screen naming conventions and aliases
    pub navigation: NavigationConfig,
    /// Story runtime settings
    pub story: StoryConfig,
    /// Resume marker persistence
    pub persistence: PersistenceConfig,
}

impl AppConfig {
    /// Read a JSON config file; absent fields take their defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Self {
        if let Ok(root) = std::env::var(CONTENT_ROOT_ENV)
            && !root.trim().is_empty()
        {
            self.content.root = PathBuf::from(root);
        }
        self
    }
}

/// Content locations, relative paths resolved against `root`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory every document path is relative to
    pub root: PathBuf,
    /// Screen registry document
    pub registry_path: String,
    /// Story catalog document
    pub catalog_path: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            registry_path: "sec/screen_registry.json".to_string(),
            catalog_path: "content/catalog/catalog.json".to_string(),
        }
    }
}

/// Screen naming conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Prefix marking narrative screens (`story_<story id>`)
    pub story_prefix: String,
    /// Prefix marking library-like screens
    pub library_prefix: String,
    /// Alias spellings for last-visited screens
    pub aliases: AliasNames,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            story_prefix: "story_".to_string(),
            library_prefix: "library".to_string(),
            aliases: AliasNames::default(),
        }
    }
}

impl NavigationConfig {
    pub fn is_story_screen(&self, id: &ScreenId) -> bool {
        id.as_str().starts_with(&self.story_prefix)
    }

    pub fn is_library_screen(&self, id: &ScreenId) -> bool {
        id.as_str().starts_with(&self.library_prefix)
    }

    /// Story id of a narrative screen, or `None` for other screens
    pub fn story_id_for(&self, id: &ScreenId) -> Option<StoryId> {
        id.as_str()
            .strip_prefix(&self.story_prefix)
            .filter(|rest| !rest.is_empty())
            .map(StoryId::from)
    }
}

/// Story runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Start node used when a story document names none
    pub default_start: NodeId,
    /// Label shown on a slot without a choice
    pub disabled_label: String,
    /// Label given to choices that carry a target but no label
    pub continue_label: String,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            default_start: NodeId::from("S01"),
            disabled_label: "Not a choice".to_string(),
            continue_label: "Continue".to_string(),
        }
    }
}

/// Resume marker persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Write and read resume markers
    pub enabled: bool,
    /// Directory holding `<story>.position.json` files
    pub save_dir: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            save_dir: PathBuf::from("saves"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "navigation": { "story_prefix": "tale_" } }"#).unwrap();
        assert_eq!(config.navigation.story_prefix, "tale_");
        assert_eq!(config.navigation.library_prefix, "library");
        assert_eq!(config.content.registry_path, "sec/screen_registry.json");
        assert_eq!(config.story.default_start.as_str(), "S01");
    }

    #[test]
    fn story_id_for_strips_prefix() {
        let nav = NavigationConfig::default();
        assert_eq!(
            nav.story_id_for(&ScreenId::from("story_backrooms")),
            Some(StoryId::from("backrooms"))
        );
        assert_eq!(nav.story_id_for(&ScreenId::from("story_")), None);
        assert_eq!(nav.story_id_for(&ScreenId::from("menu")), None);
        assert!(nav.is_library_screen(&ScreenId::from("library_founders")));
    }
}
