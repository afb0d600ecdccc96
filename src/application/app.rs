//! Application wiring and boot

use crate::application::collaborators::{CatalogPreloader, CollaboratorRegistry};
use crate::config::AppConfig;
use crate::domain::errors::LoadError;
use crate::domain::repositories::{DocumentSource, PositionStore, StoryCatalog};
use crate::domain::value_objects::{NodeId, ScreenId};
use crate::infrastructure::catalog::PackCatalog;
use crate::infrastructure::documents::FileSystemDocumentSource;
use crate::infrastructure::positions::{InMemoryPositionStore, JsonPositionStore};
use crate::input::{InputDispatcher, InputOutcome};
use crate::navigation::NavigationController;
use crate::stage::{SharedStage, Stage};
use crate::story::StoryRuntime;
use crate::types::event::{PointerEvent, ScreenChange};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Result of a tap on the stage
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// A choice slot was hit; carries the new node when the slot was enabled
    Slot(Option<NodeId>),
    /// Routed to the interactive regions
    Input(InputOutcome),
}

/// One client session: stage, navigation, input and collaborators
pub struct App {
    stage: SharedStage,
    navigation: Rc<NavigationController>,
    input: InputDispatcher,
    story: Rc<StoryRuntime>,
    collaborators: CollaboratorRegistry,
    transitions: RefCell<broadcast::Receiver<ScreenChange>>,
    booted: Cell<bool>,
    boot_lock: Mutex<()>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn DocumentSource>,
        catalog: Arc<dyn StoryCatalog>,
        positions: Arc<dyn PositionStore>,
    ) -> Self {
        let stage = Stage::shared();
        let navigation = Rc::new(NavigationController::new(
            Rc::clone(&stage),
            Arc::clone(&source),
            config.content.registry_path.clone(),
            config.navigation.clone(),
        ));
        let story = Rc::new(StoryRuntime::new(
            Rc::clone(&stage),
            source,
            Arc::clone(&catalog),
            positions,
            config.navigation.clone(),
            config.story.clone(),
        ));

        let mut collaborators = CollaboratorRegistry::new();
        collaborators.register(Rc::new(CatalogPreloader::new(catalog)));
        collaborators.register(story.clone());

        let transitions = navigation.subscribe();
        Self {
            stage,
            input: InputDispatcher::new(Rc::clone(&navigation)),
            navigation,
            story,
            collaborators,
            transitions: RefCell::new(transitions),
            booted: Cell::new(false),
            boot_lock: Mutex::new(()),
        }
    }

    /// Wire file-backed sources rooted at the configured content directory
    pub fn from_config(config: &AppConfig) -> Self {
        let source: Arc<dyn DocumentSource> =
            Arc::new(FileSystemDocumentSource::new(&config.content.root));
        let catalog: Arc<dyn StoryCatalog> = Arc::new(PackCatalog::new(
            Arc::clone(&source),
            config.content.catalog_path.clone(),
        ));
        let positions: Arc<dyn PositionStore> = if config.persistence.enabled {
            Arc::new(JsonPositionStore::new(&config.persistence.save_dir))
        } else {
            Arc::new(InMemoryPositionStore::new())
        };
        Self::new(config, source, catalog, positions)
    }

    /// Load the registry, show the first screen and start collaborators.
    ///
    /// Calling it again after success does nothing; after a failure it may be
    /// called again. An overlapping call waits for the one in flight and
    /// returns only once the app is ready or that attempt has failed.
    pub async fn boot(&self, deep_link: Option<&str>) -> Result<(), LoadError> {
        let _in_flight = self.boot_lock.lock().await;
        if self.booted.get() {
            return Ok(());
        }

        if let Err(e) = self.navigation.initialize(deep_link).await {
            log::error!("[boot] {}", e);
            return Err(e);
        }

        let failed = self.collaborators.start_all().await;
        if failed > 0 {
            log::warn!("[boot] {} collaborators failed to start", failed);
        }
        self.pump().await;
        self.booted.set(true);
        log::info!("[boot] ready");
        Ok(())
    }

    /// Deliver queued transitions to the collaborators
    pub async fn pump(&self) {
        loop {
            let next = self.transitions.borrow_mut().try_recv();
            match next {
                Ok(change) => self.collaborators.notify(&change).await,
                Err(TryRecvError::Lagged(missed)) => {
                    log::warn!("[boot] missed {} transitions", missed);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    /// Tap at a point in percent of the stage
    pub async fn tap(&self, x: f32, y: f32) -> TapOutcome {
        if self.story.slot_at(x, y).is_some() {
            return TapOutcome::Slot(self.story.select_at(x, y).await);
        }

        let mut event = PointerEvent::pointer_up(x, y);
        let outcome = self.input.dispatch(&mut event).await;
        self.pump().await;
        TapOutcome::Input(outcome)
    }

    /// Navigate to a screen id or alias
    pub async fn go(&self, raw: &str) -> Option<ScreenId> {
        let screen = self.navigation.follow(raw).await;
        self.pump().await;
        screen
    }

    /// Choose a slot of the mounted story
    pub async fn choose(&self, slot: usize) -> Option<NodeId> {
        let story_id = self.story.mounted_story()?;
        self.story.select_choice(&story_id, slot).await
    }

    pub fn stage(&self) -> &SharedStage {
        &self.stage
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn story(&self) -> &StoryRuntime {
        &self.story
    }

    pub fn collaborators(&self) -> &CollaboratorRegistry {
        &self.collaborators
    }

    pub fn is_booted(&self) -> bool {
        self.booted.get()
    }
}
