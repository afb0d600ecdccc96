//! Story runtime - mounts, renders and advances stories on narrative screens

use crate::config::{NavigationConfig, StoryConfig};
use crate::domain::repositories::{DocumentSource, PositionStore, StoryCatalog};
use crate::domain::value_objects::{NodeId, ScreenId, StoryId};
use crate::stage::{ChoiceSlot, SLOT_COUNT, SharedStage, StoryPanel};
use crate::story::format::format_story_text;
use crate::story::normalize::normalize_with;
use crate::types::event::ScreenChange;
use crate::types::story::StoryGraph;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-story reading position for this session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySession {
    pub current: NodeId,
}

/// Result of mounting a story onto a narrative screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// Rendered at this node
    Rendered(NodeId),
    /// The catalog does not know the story
    NotInCatalog,
    /// The story document could not be fetched or has no nodes
    Empty,
    /// The screen was left before loading finished
    Stale,
}

/// The story shown on the active narrative screen
#[derive(Debug, Clone)]
struct MountedStory {
    story_id: StoryId,
    screen: ScreenId,
    graph: Arc<StoryGraph>,
}

pub struct StoryRuntime {
    stage: SharedStage,
    source: Arc<dyn DocumentSource>,
    catalog: Arc<dyn StoryCatalog>,
    positions: Arc<dyn PositionStore>,
    navigation: NavigationConfig,
    config: StoryConfig,
    /// Normalized graphs by document url
    graphs: RefCell<HashMap<String, Arc<StoryGraph>>>,
    sessions: RefCell<HashMap<StoryId, StorySession>>,
    mounted: RefCell<Option<MountedStory>>,
}

impl StoryRuntime {
    pub fn new(
        stage: SharedStage,
        source: Arc<dyn DocumentSource>,
        catalog: Arc<dyn StoryCatalog>,
        positions: Arc<dyn PositionStore>,
        navigation: NavigationConfig,
        config: StoryConfig,
    ) -> Self {
        Self {
            stage,
            source,
            catalog,
            positions,
            navigation,
            config,
            graphs: RefCell::new(HashMap::new()),
            sessions: RefCell::new(HashMap::new()),
            mounted: RefCell::new(None),
        }
    }

    /// React to a completed navigation.
    ///
    /// Panels on every other screen are discarded. Entering a narrative
    /// screen mounts its story; any other screen releases the scroll lock.
    pub async fn on_screen_change(&self, change: &ScreenChange) -> Option<MountOutcome> {
        if !self
            .stage
            .borrow()
            .is_current(change.generation, &change.screen)
        {
            log::debug!("[story] ignoring superseded change to {}", change.screen);
            return Some(MountOutcome::Stale);
        }

        let story_id = self.navigation.story_id_for(&change.screen);
        self.unmount_except(story_id.as_ref().map(|_| &change.screen));

        let Some(story_id) = story_id else {
            self.stage.borrow_mut().set_scroll_locked(false);
            return None;
        };
        Some(self.mount(&story_id, &change.screen, change.generation).await)
    }

    /// Load a story and render its resume node on `screen`.
    ///
    /// Nothing is rendered unless `screen` is still the active screen of
    /// navigation `generation` once loading finishes.
    pub async fn mount(&self, story_id: &StoryId, screen: &ScreenId, generation: u64) -> MountOutcome {
        let url = match self.catalog.resolve_story(story_id).await {
            Some(locator) if !locator.story_json_url.trim().is_empty() => locator.story_json_url,
            _ => {
                log::warn!("[story] {} is not in the catalog", story_id);
                self.unmount_if_current(screen, generation);
                return MountOutcome::NotInCatalog;
            }
        };

        let graph = self.load_graph(&url).await;
        let saved = match self.positions.load_position(story_id).await {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("[story] cannot read saved position for {}: {}", story_id, e);
                None
            }
        };

        if !self.stage.borrow().is_current(generation, screen) {
            log::debug!("[story] discarding stale mount of {} on {}", story_id, screen);
            return MountOutcome::Stale;
        }

        let Some(graph) = graph.filter(|g| !g.is_empty()) else {
            log::warn!("[story] {} has no content", story_id);
            self.unmount_if_current(screen, generation);
            return MountOutcome::Empty;
        };

        let Some(node) = self.resume_node(story_id, &graph, saved) else {
            return MountOutcome::Empty;
        };

        *self.mounted.borrow_mut() = Some(MountedStory {
            story_id: story_id.clone(),
            screen: screen.clone(),
            graph: Arc::clone(&graph),
        });
        self.render_panel(screen, story_id, &graph, &node);
        log::info!("[story] mounted {} at {} on {}", story_id, node, screen);
        MountOutcome::Rendered(node)
    }

    /// Re-render the mounted story at `node_id`
    pub fn render(&self, node_id: &NodeId) -> bool {
        let Some(mounted) = self.mounted.borrow().clone() else {
            return false;
        };
        self.render_panel(&mounted.screen, &mounted.story_id, &mounted.graph, node_id);
        true
    }

    /// Follow the choice in `slot` of the mounted story.
    ///
    /// Disabled or missing slots do nothing, and so does any selection once
    /// the story's screen is no longer active. Returns the new current node.
    pub async fn select_choice(&self, story_id: &StoryId, slot: usize) -> Option<NodeId> {
        let mounted = self.mounted.borrow().clone()?;
        if &mounted.story_id != story_id {
            log::debug!("[story] {} is not mounted", story_id);
            return None;
        }

        let (generation, target) = {
            let stage = self.stage.borrow();
            if stage.active_screen() != Some(&mounted.screen) {
                log::debug!("[story] {} is no longer the active screen", mounted.screen);
                return None;
            }
            let target = stage
                .story_panel(&mounted.screen)
                .and_then(|panel| panel.slots.get(slot))
                .and_then(|s| s.target.clone())?;
            (stage.generation(), target)
        };
        if !mounted.graph.contains(&target) {
            return None;
        }

        self.sessions.borrow_mut().insert(
            story_id.clone(),
            StorySession {
                current: target.clone(),
            },
        );
        self.render_panel(&mounted.screen, story_id, &mounted.graph, &target);

        if let Err(e) = self.positions.save_position(story_id, &target).await {
            log::warn!("[story] cannot save position for {}: {}", story_id, e);
        }

        let mut stage = self.stage.borrow_mut();
        if stage.is_current(generation, &mounted.screen)
            && let Some(panel) = stage.story_panel_mut(&mounted.screen)
        {
            panel.scroll_top = 0;
        }
        log::debug!("[story] {} -> {}", story_id, target);
        Some(target)
    }

    /// Select the choice slot under a point of the active narrative screen
    pub async fn select_at(&self, x: f32, y: f32) -> Option<NodeId> {
        let slot = self.slot_at(x, y)?;
        let story_id = self.mounted_story()?;
        self.select_choice(&story_id, slot).await
    }

    /// Slot index under a point of the mounted panel, while its screen is active
    pub fn slot_at(&self, x: f32, y: f32) -> Option<usize> {
        let mounted = self.mounted.borrow();
        let mounted = mounted.as_ref()?;
        let stage = self.stage.borrow();
        if stage.active_screen() != Some(&mounted.screen) {
            return None;
        }
        stage
            .story_panel(&mounted.screen)
            .and_then(|panel| panel.slot_at(x, y))
    }

    pub fn current_node(&self, story_id: &StoryId) -> Option<NodeId> {
        self.sessions
            .borrow()
            .get(story_id)
            .map(|s| s.current.clone())
    }

    pub fn mounted_story(&self) -> Option<StoryId> {
        self.mounted.borrow().as_ref().map(|m| m.story_id.clone())
    }

    async fn load_graph(&self, url: &str) -> Option<Arc<StoryGraph>> {
        let cached = self.graphs.borrow().get(url).cloned();
        if cached.is_some() {
            return cached;
        }

        match self.source.fetch_json(url).await {
            Ok(doc) => {
                let graph = Arc::new(normalize_with(&doc, &self.config));
                log::debug!("[story] normalized {} nodes from {}", graph.len(), url);
                self.graphs
                    .borrow_mut()
                    .insert(url.to_string(), Arc::clone(&graph));
                Some(graph)
            }
            Err(e) => {
                log::warn!("[story] {}", e);
                None
            }
        }
    }

    /// Session position, then saved position, then the graph's entry node
    fn resume_node(
        &self,
        story_id: &StoryId,
        graph: &StoryGraph,
        saved: Option<NodeId>,
    ) -> Option<NodeId> {
        let mut sessions = self.sessions.borrow_mut();
        let in_session = sessions.get(story_id).map(|s| s.current.clone());

        let node = in_session
            .filter(|id| graph.contains(id))
            .or_else(|| saved.filter(|id| graph.contains(id)))
            .or_else(|| {
                if !graph.contains(graph.start()) {
                    log::warn!(
                        "[story] start node {} missing from {}, using first node",
                        graph.start(),
                        story_id
                    );
                }
                graph.entry_node_id().cloned()
            })?;

        sessions.insert(
            story_id.clone(),
            StorySession {
                current: node.clone(),
            },
        );
        Some(node)
    }

    fn render_panel(&self, screen: &ScreenId, story_id: &StoryId, graph: &StoryGraph, node_id: &NodeId) {
        let node = graph.node(node_id);
        let text = format_story_text(node.map(|n| n.text()).unwrap_or_default());

        let options = node.map(|n| n.options()).unwrap_or_default();
        if options.len() > SLOT_COUNT {
            log::debug!(
                "[story] {} has {} choices, showing {}",
                node_id,
                options.len(),
                SLOT_COUNT
            );
        }
        let slots = (0..SLOT_COUNT)
            .map(|i| match options.get(i) {
                Some(choice) => ChoiceSlot::enabled(choice.label(), choice.target().clone()),
                None => ChoiceSlot::disabled(self.config.disabled_label.as_str()),
            })
            .collect();

        let mut stage = self.stage.borrow_mut();
        let scroll_top = stage
            .story_panel(screen)
            .filter(|panel| &panel.story_id == story_id)
            .map(|panel| panel.scroll_top)
            .unwrap_or(0);
        stage.mount_story(
            screen,
            StoryPanel {
                story_id: story_id.clone(),
                node_id: node_id.clone(),
                html: text.html,
                paragraphs: text.paragraphs,
                scroll_top,
                slots,
            },
        );
    }

    fn unmount_except(&self, keep: Option<&ScreenId>) {
        let mut stage = self.stage.borrow_mut();
        let stale: Vec<ScreenId> = stage
            .screens()
            .filter(|s| s.story.is_some() && Some(&s.id) != keep)
            .map(|s| s.id.clone())
            .collect();
        for screen in stale {
            stage.unmount_story(&screen);
        }

        let mut mounted = self.mounted.borrow_mut();
        if mounted.as_ref().is_some_and(|m| Some(&m.screen) != keep) {
            *mounted = None;
        }
    }

    fn unmount_if_current(&self, screen: &ScreenId, generation: u64) {
        let mut stage = self.stage.borrow_mut();
        if stage.is_current(generation, screen) {
            stage.unmount_story(screen);
            stage.set_scroll_locked(false);
            self.mounted.borrow_mut().take();
        }
    }
}
