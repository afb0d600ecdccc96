//! Story subsystem
//!
//! [`normalize`] turns any accepted story dialect into a [`StoryGraph`](crate::types::story::StoryGraph),
//! [`format`] prepares node text for display and [`runtime`] drives the
//! narrative panel of `story_<id>` screens.

pub mod format;
pub mod normalize;
pub mod runtime;


pub use format::{FormattedText, format_story_text};
pub use normalize::{first_present, normalize, normalize_with};
pub use runtime::{MountOutcome, StoryRuntime, StorySession};
