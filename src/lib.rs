//! # versecraft
//!
//! Client runtime for screen-based interactive fiction: a registry of named
//! screens with rectangular hit regions, navigation between them, and a
//! branching story runtime that mounts on `story_<id>` screens.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use versecraft::application::App;
//! use versecraft::config::AppConfig;
//! use versecraft::infrastructure::{FileSystemDocumentSource, InMemoryPositionStore, PackCatalog};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let source = Arc::new(FileSystemDocumentSource::new("content"));
//! let catalog = Arc::new(PackCatalog::new(source.clone(), "content/catalog/catalog.json"));
//! let app = App::new(&config, source, catalog, Arc::new(InMemoryPositionStore::new()));
//!
//! app.boot(None).await?;
//! app.go("library_founders").await;
//! println!("{:?}", app.navigation().current_screen());
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! - [`domain`]: identifiers, errors and the repository traits
//! - [`types`]: registry, hitbox, story graph and event data
//! - [`stage`]: the retained model of screens, regions and story panels
//! - [`navigation`]: registry loading, hitbox compilation and the screen state machine
//! - [`input`]: pointer routing for interactive regions
//! - [`story`]: normalization, text formatting and the story runtime
//! - [`infrastructure`]: file-backed and in-memory implementations
//! - [`application`]: boot and collaborator wiring

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod navigation;
pub mod stage;
pub mod story;
pub mod types;

pub use application::{App, TapOutcome};
pub use config::AppConfig;
pub use domain::{LoadError, NavigationError, NodeId, ScreenId, SourceError, StoryId};
pub use navigation::NavigationController;
pub use stage::{SharedStage, Stage};
pub use story::{StoryRuntime, normalize};
pub use types::{ScreenChange, StoryGraph};
