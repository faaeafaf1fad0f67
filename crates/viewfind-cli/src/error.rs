//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Fixture could not be interpreted
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON fixture or output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML fixture error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Lookup failed inside the finder
    #[error("Lookup failed: {0}")]
    Finder(#[from] viewfind::FinderError),
}

impl CliError {
    /// Create a fixture error
    #[must_use]
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use viewfind::FinderError;

    #[test]
    fn test_fixture_error() {
        let err = CliError::fixture("missing root");
        assert!(err.to_string().contains("Fixture"));
        assert!(err.to_string().contains("missing root"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CliError = io_err.into();
        assert!(matches!(err, CliError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_finder_error_from() {
        let err: CliError = FinderError::invalid_strategy("css selector").into();
        assert!(matches!(err, CliError::Finder(_)));
        assert!(err.to_string().contains("css selector"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = json_err.into();
        assert!(err.to_string().contains("JSON"));
    }
}
