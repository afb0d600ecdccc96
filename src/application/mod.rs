//! Application layer - Session wiring, boot and startup collaborators

pub mod app;
pub mod collaborators;

pub use app::{App, TapOutcome};
pub use collaborators::{CatalogPreloader, Collaborator, CollaboratorRegistry, CollaboratorStatus};
