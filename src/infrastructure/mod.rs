//! Infrastructure layer - External dependencies and adapters
//!
//! File-system and in-memory implementations of the domain repository
//! traits: document sources, the story catalog and resume markers.

pub mod catalog;
pub mod documents;
pub mod positions;

pub use catalog::*;
pub use documents::*;
pub use positions::*;
