//! Error types for discovery and configuration.

use std::io;
use std::path::PathBuf;

use fixture_model::ModelError;
use thiserror::Error;

/// Errors raised while discovering suites or loading configuration.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The root exists but could not be enumerated.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration or fallback file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration or fallback file is not valid TOML for its schema.
    #[error("failed to parse {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// A fallback entry does not describe a usable model.
    #[error("invalid fallback entry #{index}: {source}")]
    InvalidFallback {
        index: usize,
        #[source]
        source: ModelError,
    },
}

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiscoveryError::ReadDir {
            path: PathBuf::from("/tmp/src"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read directory /tmp/src: denied");
    }
}
