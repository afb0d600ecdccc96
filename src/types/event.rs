//! Events flowing between the input layer, navigation and collaborators

use crate::domain::value_objects::ScreenId;
use serde::{Deserialize, Serialize};

/// Broadcast after every completed navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenChange {
    /// The resolved screen that is now active
    pub screen: ScreenId,
    /// Navigation generation that produced this change
    pub generation: u64,
}

/// Pointer event kinds the dispatcher distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Up,
    Click,
}

/// A tap on the stage, positioned in percent of the active screen box
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            default_prevented: false,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Click, x, y)
    }

    /// Suppress the host's default handling of this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
