//! Navigation controller - the screen state machine

use crate::config::NavigationConfig;
use crate::domain::errors::{LoadError, NavigationError};
use crate::domain::repositories::DocumentSource;
use crate::domain::value_objects::{NavigationToken, ResourceRef, ScreenId};
use crate::navigation::hitboxes::{HitboxCompiler, HitboxOutcome};
use crate::navigation::registry::RegistryLoader;
use crate::stage::{SharedStage, Stage};
use crate::types::event::ScreenChange;
use crate::types::registry::ScreenRegistry;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;

const TRANSITION_CAPACITY: usize = 64;

/// Last-visited screens used to resolve aliases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationMemory {
    pub last_library: Option<ScreenId>,
    pub last_story: Option<ScreenId>,
}

/// Owns screen activation for one session.
///
/// `go` takes `&self`; overlapping calls may interleave at their await
/// points and rely on the stage's generation check to drop stale work.
pub struct NavigationController {
    stage: SharedStage,
    loader: RegistryLoader,
    hitboxes: HitboxCompiler,
    config: NavigationConfig,
    memory: RefCell<NavigationMemory>,
    loaded_styles: RefCell<HashSet<ResourceRef>>,
    transitions: broadcast::Sender<ScreenChange>,
}

impl NavigationController {
    pub fn new(
        stage: SharedStage,
        source: Arc<dyn DocumentSource>,
        registry_path: impl Into<String>,
        config: NavigationConfig,
    ) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CAPACITY);
        Self {
            stage,
            loader: RegistryLoader::new(Arc::clone(&source), registry_path),
            hitboxes: HitboxCompiler::new(source),
            config,
            memory: RefCell::new(NavigationMemory::default()),
            loaded_styles: RefCell::new(HashSet::new()),
            transitions,
        }
    }

    /// Load the registry (once) and perform the first transition.
    ///
    /// A non-empty `deep_link` wins over the registry's start screen; a deep
    /// link naming an unknown screen falls back to the start screen.
    pub async fn initialize(&self, deep_link: Option<&str>) -> Result<(), LoadError> {
        if self.loader.cached().is_some() {
            return Ok(());
        }

        let registry = self.loader.load().await?;
        {
            let mut stage = self.stage.borrow_mut();
            for id in registry.screen_ids() {
                stage.ensure_screen(id);
            }
        }

        let requested = deep_link
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(|link| NavigationToken::parse(link, &self.config.aliases));

        let token = match requested {
            Some(token) => match self.resolve(&token, &registry) {
                Ok(id) => NavigationToken::Screen(id),
                Err(e) => {
                    log::warn!("[navigation] ignoring deep link: {}", e);
                    NavigationToken::Screen(registry.start_screen.clone())
                }
            },
            None => NavigationToken::Screen(registry.start_screen.clone()),
        };

        self.go(token).await;
        Ok(())
    }

    /// Navigate to a raw hitbox argument or deep link
    pub async fn follow(&self, raw: &str) -> Option<ScreenId> {
        self.go(NavigationToken::parse(raw, &self.config.aliases)).await
    }

    /// Activate the screen a token resolves to.
    ///
    /// Returns the activated screen, or `None` when the token was rejected and
    /// the previously active screen stays active.
    pub async fn go(&self, token: impl Into<NavigationToken>) -> Option<ScreenId> {
        let token = token.into();

        let Some(registry) = self.loader.cached() else {
            log::warn!("[navigation] {}", NavigationError::NotInitialized);
            return None;
        };

        let screen = match self.resolve(&token, &registry) {
            Ok(screen) => screen,
            Err(e) => {
                log::warn!("[navigation] {}", e);
                return None;
            }
        };
        let screen_cfg = registry.get(&screen).cloned().unwrap_or_default();

        let generation = {
            let mut stage = self.stage.borrow_mut();
            let generation = stage.begin_navigation();
            stage.deactivate_all();
            if let Some(css) = &screen_cfg.css {
                self.load_style_once(&mut stage, css);
            }
            stage.activate(&screen);
            generation
        };
        self.remember(&screen);
        log::info!("[navigation] -> {} (generation {})", screen, generation);

        match &screen_cfg.hitboxes {
            Some(hitbox_ref) => {
                let outcome = self
                    .hitboxes
                    .apply(&self.stage, hitbox_ref, &screen, generation)
                    .await;
                if outcome == HitboxOutcome::Failed {
                    log::warn!("[navigation] {} shown without interactive regions", screen);
                }
            }
            None => {
                self.stage.borrow_mut().replace_regions(&screen, Vec::new());
            }
        }

        let change = ScreenChange {
            screen: screen.clone(),
            generation,
        };
        if self.transitions.send(change).is_err() {
            log::debug!("[navigation] no transition listeners for {}", screen);
        }

        Some(screen)
    }

    /// Resolve aliases against session memory and check the registry
    pub fn resolve(
        &self,
        token: &NavigationToken,
        registry: &ScreenRegistry,
    ) -> Result<ScreenId, NavigationError> {
        let memory = self.memory.borrow();
        let id = match token {
            NavigationToken::Screen(id) => id.clone(),
            NavigationToken::LastLibrary => memory
                .last_library
                .clone()
                .ok_or_else(|| NavigationError::UnresolvedAlias(token.clone()))?,
            NavigationToken::LastStory => memory
                .last_story
                .clone()
                .ok_or_else(|| NavigationError::UnresolvedAlias(token.clone()))?,
        };

        if !registry.contains(&id) {
            return Err(NavigationError::UnknownScreen(id));
        }
        Ok(id)
    }

    fn load_style_once(&self, stage: &mut Stage, href: &ResourceRef) {
        if href.as_str().trim().is_empty() {
            return;
        }
        if self.loaded_styles.borrow_mut().insert(href.clone()) {
            stage.attach_stylesheet(href.clone());
        }
    }

    fn remember(&self, screen: &ScreenId) {
        let mut memory = self.memory.borrow_mut();
        if self.config.is_library_screen(screen) {
            memory.last_library = Some(screen.clone());
        }
        if self.config.is_story_screen(screen) {
            memory.last_story = Some(screen.clone());
        }
    }

    /// Receive a `ScreenChange` after every completed navigation
    pub fn subscribe(&self) -> broadcast::Receiver<ScreenChange> {
        self.transitions.subscribe()
    }

    pub fn current_screen(&self) -> Option<ScreenId> {
        self.stage.borrow().active_screen().cloned()
    }

    pub fn registry(&self) -> Option<Arc<ScreenRegistry>> {
        self.loader.cached()
    }

    pub fn memory(&self) -> NavigationMemory {
        self.memory.borrow().clone()
    }

    pub fn stage(&self) -> &SharedStage {
        &self.stage
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }
}
