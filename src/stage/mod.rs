//! Retained model of everything the front end shows
//!
//! The stage is the explicit context object shared by the navigation
//! controller, the hitbox compiler and the story runtime. It owns the
//! active-screen pointer and the navigation generation counter that async
//! continuations check before mutating it.

use crate::domain::value_objects::{NodeId, ResourceRef, ScreenId, StoryId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Number of choice slots on a narrative screen
pub const SLOT_COUNT: usize = 4;

/// Fixed positions of the four choice slots
pub const SLOT_GEOMETRY: [Rect; SLOT_COUNT] = [
    Rect::new(4.36, 70.72, 71.8, 4.7),
    Rect::new(4.63, 78.14, 71.8, 4.7),
    Rect::new(4.37, 84.70, 71.8, 4.7),
    Rect::new(4.36, 91.70, 71.8, 4.7),
];

/// Stage shared between the controller and its collaborators
pub type SharedStage = Rc<RefCell<Stage>>;

/// Box in percent of the owning screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// An interactive region materialized from a hitbox entry
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Accessible label; the hitbox id or `"hitbox"`
    pub label: String,
    pub rect: Rect,
    pub action: Option<String>,
    pub arg: Option<String>,
}

/// One of the four choice positions under the narrative panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSlot {
    pub label: String,
    pub target: Option<NodeId>,
}

impl ChoiceSlot {
    pub fn enabled(label: impl Into<String>, target: NodeId) -> Self {
        Self {
            label: label.into(),
            target: Some(target),
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

/// Rendered narrative for one story screen
#[derive(Debug, Clone, PartialEq)]
pub struct StoryPanel {
    pub story_id: StoryId,
    pub node_id: NodeId,
    /// Escaped, paragraph-segmented markup
    pub html: String,
    /// The same paragraphs as plain text
    pub paragraphs: Vec<String>,
    pub scroll_top: u32,
    pub slots: Vec<ChoiceSlot>,
}

impl StoryPanel {
    /// Index of the slot under a point, if any
    pub fn slot_at(&self, x: f32, y: f32) -> Option<usize> {
        SLOT_GEOMETRY
            .iter()
            .take(self.slots.len())
            .position(|rect| rect.contains(x, y))
    }
}

/// One screen and what is currently materialized on it
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSurface {
    pub id: ScreenId,
    pub active: bool,
    pub regions: Vec<Region>,
    pub story: Option<StoryPanel>,
}

impl ScreenSurface {
    fn new(id: ScreenId) -> Self {
        Self {
            id,
            active: false,
            regions: Vec::new(),
            story: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Stage {
    screens: BTreeMap<ScreenId, ScreenSurface>,
    active: Option<ScreenId>,
    generation: u64,
    stylesheets: Vec<ResourceRef>,
    fragment: Option<String>,
    scroll_locked: bool,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStage {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Create the surface for a screen if it does not exist yet
    pub fn ensure_screen(&mut self, id: &ScreenId) {
        self.screens
            .entry(id.clone())
            .or_insert_with(|| ScreenSurface::new(id.clone()));
    }

    pub fn screen(&self, id: &ScreenId) -> Option<&ScreenSurface> {
        self.screens.get(id)
    }

    pub fn screens(&self) -> impl Iterator<Item = &ScreenSurface> {
        self.screens.values()
    }

    pub fn active_screen(&self) -> Option<&ScreenId> {
        self.active.as_ref()
    }

    pub fn active_surface(&self) -> Option<&ScreenSurface> {
        self.active.as_ref().and_then(|id| self.screens.get(id))
    }

    pub fn deactivate_all(&mut self) {
        for surface in self.screens.values_mut() {
            surface.active = false;
        }
        self.active = None;
    }

    /// Make `id` the sole active screen and record it as the location fragment
    pub fn activate(&mut self, id: &ScreenId) {
        self.deactivate_all();
        self.ensure_screen(id);
        if let Some(surface) = self.screens.get_mut(id) {
            surface.active = true;
        }
        self.active = Some(id.clone());
        self.fragment = Some(id.to_string());
    }

    /// Start a new navigation and return its generation
    pub fn begin_navigation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a continuation captured at `generation` for `screen` may still mutate
    pub fn is_current(&self, generation: u64, screen: &ScreenId) -> bool {
        self.generation == generation && self.active.as_ref() == Some(screen)
    }

    pub fn attach_stylesheet(&mut self, href: ResourceRef) {
        self.stylesheets.push(href);
    }

    pub fn stylesheets(&self) -> &[ResourceRef] {
        &self.stylesheets
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Replace all regions of a screen; false when the screen has no surface
    pub fn replace_regions(&mut self, screen: &ScreenId, regions: Vec<Region>) -> bool {
        match self.screens.get_mut(screen) {
            Some(surface) => {
                surface.regions = regions;
                true
            }
            None => false,
        }
    }

    pub fn regions(&self, screen: &ScreenId) -> &[Region] {
        self.screens
            .get(screen)
            .map(|s| s.regions.as_slice())
            .unwrap_or(&[])
    }

    /// Topmost region of the active screen under a point
    pub fn region_at(&self, x: f32, y: f32) -> Option<&Region> {
        self.active_surface()?
            .regions
            .iter()
            .rev()
            .find(|region| region.rect.contains(x, y))
    }

    pub fn story_panel(&self, screen: &ScreenId) -> Option<&StoryPanel> {
        self.screens.get(screen).and_then(|s| s.story.as_ref())
    }

    pub fn story_panel_mut(&mut self, screen: &ScreenId) -> Option<&mut StoryPanel> {
        self.screens.get_mut(screen).and_then(|s| s.story.as_mut())
    }

    pub fn mount_story(&mut self, screen: &ScreenId, panel: StoryPanel) {
        self.ensure_screen(screen);
        if let Some(surface) = self.screens.get_mut(screen) {
            surface.story = Some(panel);
        }
        self.scroll_locked = true;
    }

    /// Discard a rendered story panel; returns whether one was mounted
    pub fn unmount_story(&mut self, screen: &ScreenId) -> bool {
        let removed = self
            .screens
            .get_mut(screen)
            .and_then(|s| s.story.take())
            .is_some();
        if !self.screens.values().any(|s| s.story.is_some()) {
            self.scroll_locked = false;
        }
        removed
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
