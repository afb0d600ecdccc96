//! Domain layer - Identifiers, errors and the seams to the outside world
//!
//! Nothing here touches the file system or the stage; infrastructure
//! implements the repository traits, application code consumes them.

pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use errors::*;
pub use repositories::*;
pub use value_objects::*;
