//! Result and error types for view finding.

use thiserror::Error;

/// Result type for finder operations
pub type FinderResult<T> = Result<T, FinderError>;

/// Errors that can occur while locating or interacting with views
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinderError {
    /// The strategy tag is not one of the supported locator strategies
    #[error("Strategy is not implemented: {tag}")]
    InvalidStrategy {
        /// The offending tag, verbatim
        tag: String,
    },

    /// A collaborator could not evaluate the selector (e.g. malformed XPath)
    #[error("Could not evaluate selector {selector:?}: {message}")]
    SelectorEvaluationFault {
        /// Selector that failed
        selector: String,
        /// Error message
        message: String,
    },

    /// No view satisfies the predicate
    #[error("No views in hierarchy found matching: {predicate}")]
    NoMatchingElement {
        /// Description of the predicate
        predicate: String,
    },

    /// More than one view satisfies a predicate that required uniqueness
    #[error("'{predicate}' matches multiple views in the hierarchy")]
    AmbiguousMatch {
        /// Description of the predicate
        predicate: String,
    },

    /// An assertion ran against a bound view and failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// An action could not be performed on a bound view
    #[error("Action failed: {message}")]
    ActionFailed {
        /// Error message
        message: String,
    },

    /// Enumeration hit its step bound without the tree reporting "no match"
    #[error("Enumeration did not terminate within {limit} steps")]
    EnumerationLimit {
        /// The configured step bound
        limit: usize,
    },
}

impl FinderError {
    /// Create an invalid strategy error
    #[must_use]
    pub fn invalid_strategy(tag: impl Into<String>) -> Self {
        Self::InvalidStrategy { tag: tag.into() }
    }

    /// Create a selector evaluation fault
    #[must_use]
    pub fn selector_fault(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SelectorEvaluationFault {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a no-matching-element error
    #[must_use]
    pub fn no_matching_element(predicate: impl Into<String>) -> Self {
        Self::NoMatchingElement {
            predicate: predicate.into(),
        }
    }

    /// Create an ambiguous match error
    #[must_use]
    pub fn ambiguous_match(predicate: impl Into<String>) -> Self {
        Self::AmbiguousMatch {
            predicate: predicate.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create an action failure
    #[must_use]
    pub fn action_failed(message: impl Into<String>) -> Self {
        Self::ActionFailed {
            message: message.into(),
        }
    }

    /// True when no view satisfied the predicate
    #[must_use]
    pub const fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatchingElement { .. })
    }

    /// True when several views satisfied a predicate that required one
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousMatch { .. })
    }
}
