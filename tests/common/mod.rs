//! Shared fixtures for integration tests
#![allow(dead_code)]

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use versecraft::application::App;
use versecraft::config::AppConfig;
use versecraft::domain::PositionStore;
use versecraft::infrastructure::{InMemoryDocumentSource, InMemoryPositionStore, PackCatalog};

pub const REGISTRY_PATH: &str = "sec/screen_registry.json";
pub const CATALOG_PATH: &str = "content/catalog/catalog.json";

pub fn registry() -> Value {
    json!({
        "start_screen": "menu",
        "screens": {
            "menu": { "css": "css/menu.css", "hitboxes": "sec/hitboxes/menu.json" },
            "library_founders": { "css": "css/library.css", "hitboxes": "sec/hitboxes/library.json" },
            "story_beta": { "css": "css/story.css", "hitboxes": "sec/hitboxes/story.json" }
        }
    })
}

pub fn documents() -> Vec<(&'static str, Value)> {
    vec![
        (REGISTRY_PATH, registry()),
        (
            "sec/hitboxes/menu.json",
            json!({ "hitboxes": [
                { "id": "open_library", "x": 30, "y": 40, "w": 40, "h": 10, "action": "go", "arg": "library_founders" }
            ]}),
        ),
        (
            "sec/hitboxes/library.json",
            json!({ "hitboxes": [
                { "id": "beta", "x": 10, "y": 10, "w": 20, "h": 20, "action": "go", "arg": "story_beta" },
                { "id": "alpha", "x": 40, "y": 10, "w": 20, "h": 20, "action": "go", "arg": "story_alpha" },
                { "id": "home", "x": 0, "y": 90, "w": 10, "h": 10, "action": "go", "arg": "menu" }
            ]}),
        ),
        (
            "sec/hitboxes/story.json",
            json!({ "hitboxes": [
                { "id": "exit", "x": 85, "y": 2, "w": 12, "h": 6, "action": "go", "arg": "last_library" }
            ]}),
        ),
        (
            CATALOG_PATH,
            json!({ "packs": [ {
                "packId": "founders",
                "root": "content/founders/",
                "stories": [ { "id": "beta", "storyJson": "/stories/beta.json", "cover": "covers/beta.webp" } ]
            } ] }),
        ),
        (
            "content/founders/stories/beta.json",
            json!({
                "start": "S1",
                "scenes": {
                    "S1": { "text": "Hello", "options": [ { "label": "Go", "to": "S2" } ] },
                    "S2": { "text": "Bye" }
                }
            }),
        ),
    ]
}

pub fn source() -> Arc<InMemoryDocumentSource> {
    let source = InMemoryDocumentSource::new();
    for (path, doc) in documents() {
        source.insert(path, doc);
    }
    Arc::new(source)
}

pub fn app_with(source: Arc<InMemoryDocumentSource>, positions: Arc<dyn PositionStore>) -> App {
    let catalog = Arc::new(PackCatalog::new(source.clone(), CATALOG_PATH));
    App::new(&AppConfig::default(), source, catalog, positions)
}

pub fn app() -> App {
    app_with(source(), Arc::new(InMemoryPositionStore::new()))
}

/// Center of the active screen's region with this label
pub fn region_center(app: &App, label: &str) -> (f32, f32) {
    let stage = app.stage().borrow();
    let surface = stage.active_surface().expect("an active screen");
    surface
        .regions
        .iter()
        .find(|r| r.label == label)
        .map(|r| r.rect.center())
        .unwrap_or_else(|| panic!("no region {label} on {}", surface.id))
}

pub fn active_screen(app: &App) -> String {
    app.navigation()
        .current_screen()
        .map(|id| id.to_string())
        .unwrap_or_default()
}

/// Fresh directory under the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("versecraft-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write every fixture document below `root`
pub fn write_content(root: &Path) {
    for (path, doc) in documents() {
        let file = root.join(path);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    }
}
