//! Error types for wcb-privacy

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wcb-privacy
///
/// Exporters never build these themselves. They only carry faults raised by
/// the host collaborators (document store, account directory) or by the
/// surrounding tooling.
#[derive(Debug, Error)]
pub enum PrivacyError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store or account directory failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Snapshot file is malformed or has an unsupported version
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PrivacyError>,
    },
}

impl PrivacyError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PrivacyError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for PrivacyError {
    fn from(err: toml::de::Error) -> Self {
        PrivacyError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for PrivacyError {
    fn from(err: toml::ser::Error) -> Self {
        PrivacyError::Toml(err.to_string())
    }
}

/// Result type alias for wcb-privacy
pub type Result<T> = std::result::Result<T, PrivacyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrivacyError::Storage("connection reset".to_string());
        assert_eq!(err.to_string(), "Storage error: connection reset");
    }

    #[test]
    fn test_error_with_context() {
        let err = PrivacyError::InvalidSnapshot("missing users".to_string());
        let err = err.with_context("Failed to open snapshot");
        assert!(err.to_string().contains("Failed to open snapshot"));
        assert!(err.to_string().contains("missing users"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PrivacyError = io_err.into();
        assert!(matches!(err, PrivacyError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let err: PrivacyError = toml_err.into();
        assert!(matches!(err, PrivacyError::Toml(_)));
    }
}
