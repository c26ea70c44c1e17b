//! Error types for fixture model construction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or checking model types.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Suite number is empty, non-numeric, or wider than three digits.
    #[error("invalid suite number '{value}': expected 1-3 ASCII digits")]
    InvalidSuiteNumber { value: String },

    /// Category name did not match any known family.
    #[error("unknown category '{value}'")]
    UnknownCategory { value: String },

    /// The descriptor source directory is absent or not a directory.
    #[error("source directory not found: {path}")]
    SourceMissing { path: PathBuf },

    /// A required descriptor field was blank.
    #[error("model field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::InvalidSuiteNumber {
            value: "7a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid suite number '7a': expected 1-3 ASCII digits"
        );
    }
}
