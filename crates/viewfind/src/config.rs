//! Finder configuration

use serde::{Deserialize, Serialize};

/// Default bound on enumeration steps.
///
/// Reaching it means the tree never reported "no match"; it is not a real
/// result size.
pub const DEFAULT_MAX_ENUMERATION_STEPS: usize = i32::MAX as usize;

/// Options for a [`crate::Finder`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Package used when resolving symbolic resource ids
    pub target_package: String,
    /// Whether enumeration probes require the match to be displayed
    pub require_displayed: bool,
    /// Last-resort bound on enumeration steps
    pub max_enumeration_steps: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            target_package: String::new(),
            require_displayed: true,
            max_enumeration_steps: DEFAULT_MAX_ENUMERATION_STEPS,
        }
    }
}

impl FinderConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target package for id resolution
    #[must_use]
    pub fn with_target_package(mut self, package: impl Into<String>) -> Self {
        self.target_package = package.into();
        self
    }

    /// Require (or not) that enumerated matches are displayed
    #[must_use]
    pub const fn with_require_displayed(mut self, require: bool) -> Self {
        self.require_displayed = require;
        self
    }

    /// Set the enumeration step bound
    #[must_use]
    pub const fn with_max_enumeration_steps(mut self, steps: usize) -> Self {
        self.max_enumeration_steps = steps;
        self
    }
}
