//! Domain value objects - Immutable identifiers used across navigation and stories

use serde::{Deserialize, Serialize};

/// Macro to implement common traits for string wrapper types
macro_rules! impl_string_wrapper {
    ($type:ident) => {
        impl $type {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $type {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $type {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::borrow::Borrow<str> for $type {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Identifier of a screen declared in the screen registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl_string_wrapper!(ScreenId);

/// Identifier of a story in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl_string_wrapper!(StoryId);

/// Identifier of a scene node inside one story graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl_string_wrapper!(NodeId);

/// Path of a style or hitbox resource referenced by the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl_string_wrapper!(ResourceRef);

/// What `go()` is asked to navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationToken {
    /// A concrete screen id
    Screen(ScreenId),
    /// The most recently visited library-like screen
    LastLibrary,
    /// The most recently visited narrative screen
    LastStory,
}

impl NavigationToken {
    /// Parse a raw token, recognising the configured alias names
    pub fn parse(raw: &str, aliases: &AliasNames) -> Self {
        let raw = raw.trim();
        if raw == aliases.last_library {
            Self::LastLibrary
        } else if raw == aliases.last_story {
            Self::LastStory
        } else {
            Self::Screen(ScreenId::from(raw))
        }
    }
}

impl From<ScreenId> for NavigationToken {
    fn from(id: ScreenId) -> Self {
        Self::Screen(id)
    }
}

impl std::fmt::Display for NavigationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Screen(id) => write!(f, "{id}"),
            Self::LastLibrary => write!(f, "<last library>"),
            Self::LastStory => write!(f, "<last story>"),
        }
    }
}

/// Alias spellings accepted in hitbox arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasNames {
    pub last_library: String,
    pub last_story: String,
}

impl Default for AliasNames {
    fn default() -> Self {
        Self {
            last_library: "last_library".to_string(),
            last_story: "last_story".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognises_aliases() {
        let aliases = AliasNames::default();
        assert_eq!(
            NavigationToken::parse("last_library", &aliases),
            NavigationToken::LastLibrary
        );
        assert_eq!(
            NavigationToken::parse(" last_story ", &aliases),
            NavigationToken::LastStory
        );
        assert_eq!(
            NavigationToken::parse("menu", &aliases),
            NavigationToken::Screen(ScreenId::from("menu"))
        );
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = NodeId::from("S01");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"S01\"");
    }
}
