//! Locator strategies.
//!
//! Strategies arrive as W3C/Appium tag strings (`"id"`, `"xpath"`, ...).
//! Parsing is exact: tags are compared byte for byte and anything unknown is
//! rejected with [`FinderError::InvalidStrategy`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::result::FinderError;

/// The closed set of supported locator strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Resource identifier, resolved through an [`crate::IdResolver`]
    #[serde(rename = "id")]
    Id,
    /// Runtime class name suffix
    #[serde(rename = "class name")]
    ClassName,
    /// Exact rendered text
    #[serde(rename = "text")]
    Text,
    /// Exact content description
    #[serde(rename = "accessibility id")]
    AccessibilityId,
    /// Path query evaluated by a [`crate::PathQueryEngine`]
    #[serde(rename = "xpath")]
    XPath,
}

impl Strategy {
    /// Wire tag for this strategy
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ClassName => "class name",
            Self::Text => "text",
            Self::AccessibilityId => "accessibility id",
            Self::XPath => "xpath",
        }
    }

    /// All strategies, in declaration order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Id,
            Self::ClassName,
            Self::Text,
            Self::AccessibilityId,
            Self::XPath,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = FinderError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|strategy| strategy.tag() == tag)
            .ok_or_else(|| FinderError::invalid_strategy(tag))
    }
}

/// Whether the caller wants one match or all of them.
///
/// Only [`Strategy::XPath`] builds a different predicate per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Find one element
    Single,
    /// Find all elements
    Multi,
}
