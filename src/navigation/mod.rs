//! Screen navigation: registry loading, hitbox compilation and the controller
//!
//! The controller resolves navigation tokens, activates screens on the shared
//! stage and broadcasts a [`crate::types::ScreenChange`] once the screen's
//! hitboxes have settled.

pub mod controller;
pub mod hitboxes;
pub mod registry;


pub use controller::{NavigationController, NavigationMemory};
pub use hitboxes::{HitboxCompiler, HitboxOutcome};
pub use registry::RegistryLoader;
