//! View state for the terminal player
//!
//! Tracks what was last printed so only changes are shown again.

use crate::domain::value_objects::{NodeId, ScreenId};
use crate::stage::{Stage, StoryPanel};

/// Clear the terminal screen (cross-platform)
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");

    if std::io::Write::flush(&mut std::io::stdout()).is_err() {
        for _ in 0..50 {
            println!();
        }
    }
}

/// What the terminal currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub screen: Option<ScreenId>,
    pub node: Option<NodeId>,
}

/// Changes since the last render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDelta {
    pub screen_changed: bool,
    pub node_changed: bool,
}

impl RenderDelta {
    pub fn is_empty(&self) -> bool {
        !self.screen_changed && !self.node_changed
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the stage's current screen and story node, returning what changed
    pub fn observe(&mut self, stage: &Stage) -> RenderDelta {
        let screen = stage.active_screen().cloned();
        let node = screen
            .as_ref()
            .and_then(|id| stage.story_panel(id))
            .map(|panel| panel.node_id.clone());

        let delta = RenderDelta {
            screen_changed: screen != self.screen,
            node_changed: node != self.node,
        };
        self.screen = screen;
        self.node = node;
        delta
    }
}

/// Text rendering of the active screen
pub fn describe(stage: &Stage) -> String {
    let Some(surface) = stage.active_surface() else {
        return "(no active screen)\n".to_string();
    };

    let mut out = format!("== {} ==\n", surface.id);
    if surface.regions.is_empty() {
        out.push_str("  (no regions)\n");
    }
    for (i, region) in surface.regions.iter().enumerate() {
        out.push_str(&format!(
            "  [{}] {} -> {} {}\n",
            i + 1,
            region.label,
            region.action.as_deref().unwrap_or("-"),
            region.arg.as_deref().unwrap_or("")
        ));
    }
    if let Some(panel) = &surface.story {
        out.push_str(&describe_panel(panel));
    }
    out
}

fn describe_panel(panel: &StoryPanel) -> String {
    let mut out = format!("\n-- {} / {} --\n", panel.story_id, panel.node_id);
    for paragraph in &panel.paragraphs {
        out.push_str(&strip_emphasis(paragraph));
        out.push_str("\n\n");
    }
    for (i, slot) in panel.slots.iter().enumerate() {
        let marker = if slot.is_enabled() { ' ' } else { 'x' };
        out.push_str(&format!("  c{}{} {}\n", i + 1, marker, slot.label));
    }
    out
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}
