//! Domain errors - Failures at the document, boot and navigation boundaries

use crate::domain::value_objects::{NavigationToken, ScreenId};
use thiserror::Error;

/// Failure to fetch or decode a JSON document
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("Document not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl SourceError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Fatal boot failure: the screen registry could not be loaded
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("screen registry unavailable: {0}")]
    Source(#[from] SourceError),

    #[error("screen registry {path} is malformed: {message}")]
    Malformed { path: String, message: String },
}

impl LoadError {
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Navigation contract violations; logged, never escalated
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    #[error("navigation requested before the registry was loaded")]
    NotInitialized,

    #[error("unknown screen: {0}")]
    UnknownScreen(ScreenId),

    #[error("alias {0} has no remembered screen")]
    UnresolvedAlias(NavigationToken),
}
