//! Core types for the versecraft library
//!
//! - Registry: the screen registry document
//! - Hitbox: per-screen interactive region specifications
//! - Story: the canonical story graph produced by the normalizer
//! - Event: transition notifications and pointer input

pub mod event;
pub mod hitbox;
pub mod registry;
pub mod story;

pub use event::{PointerEvent, PointerKind, ScreenChange};
pub use hitbox::{Hitbox, HitboxSpec};
pub use registry::{ScreenConfig, ScreenRegistry};
pub use story::{Choice, SceneNode, StoryGraph};
