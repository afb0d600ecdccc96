//! Screen registry document

use crate::domain::errors::LoadError;
use crate::domain::value_objects::{ResourceRef, ScreenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resources attached to one screen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Stylesheet loaded the first time the screen is shown
    #[serde(default)]
    pub css: Option<ResourceRef>,
    /// Hitbox document applied every time the screen is shown
    #[serde(default)]
    pub hitboxes: Option<ResourceRef>,
}

/// The session-wide map of screens, loaded once at boot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRegistry {
    pub start_screen: ScreenId,
    pub screens: BTreeMap<ScreenId, ScreenConfig>,
}

impl ScreenRegistry {
    /// Decode a registry document fetched from `path`
    pub fn from_value(value: serde_json::Value, path: &str) -> Result<Self, LoadError> {
        serde_json::from_value(value).map_err(|e| LoadError::malformed(path, e.to_string()))
    }

    pub fn get(&self, id: &ScreenId) -> Option<&ScreenConfig> {
        self.screens.get(id)
    }

    pub fn contains(&self, id: &ScreenId) -> bool {
        self.screens.contains_key(id)
    }

    pub fn screen_ids(&self) -> impl Iterator<Item = &ScreenId> {
        self.screens.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_registry_with_optional_resources() {
        let doc = json!({
            "start_screen": "menu",
            "screens": {
                "menu": { "css": "css/menu.css", "hitboxes": "hb/menu.json" },
                "credits": {}
            }
        });

        let registry = ScreenRegistry::from_value(doc, "sec/screen_registry.json").unwrap();
        assert_eq!(registry.start_screen.as_str(), "menu");
        assert_eq!(
            registry.get(&ScreenId::from("menu")).unwrap().css,
            Some(ResourceRef::from("css/menu.css"))
        );
        assert_eq!(
            registry.get(&ScreenId::from("credits")).unwrap(),
            &ScreenConfig::default()
        );
    }

    #[test]
    fn missing_start_screen_is_malformed() {
        let doc = json!({ "screens": {} });
        let err = ScreenRegistry::from_value(doc, "reg.json").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
