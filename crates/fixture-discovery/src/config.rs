//! Tool configuration.
//!
//! Configuration is a TOML file. Resolution order:
//! 1. an explicit path (the CLI `--config` flag)
//! 2. the `CLAIMS_FIXTURES_CONFIG` environment variable
//! 3. `claims-fixtures.toml` in the working directory, if present
//! 4. built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

use fixture_model::ModelEntry;
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Environment variable for overriding the configuration file path.
pub const CONFIG_ENV_VAR: &str = "CLAIMS_FIXTURES_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "claims-fixtures.toml";

/// Test stage folder under `payloads/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Regression,
    Smoke,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regression => "regression",
            Self::Smoke => "smoke",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where discovered suites send their renamed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryLayout {
    pub dest_root: PathBuf,
    pub stage: Stage,
}

impl Default for DiscoveryLayout {
    fn default() -> Self {
        Self {
            dest_root: PathBuf::from("renaming_jsons"),
            stage: Stage::Regression,
        }
    }
}

impl DiscoveryLayout {
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
            ..Self::default()
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Root holding one subdirectory per category (`WGS_CSBD`, `GBDF`, ...).
    pub source_root: PathBuf,
    /// Root receiving renamed files.
    pub dest_root: PathBuf,
    /// Root receiving generated collections.
    pub collections_dir: PathBuf,
    /// Root receiving timing reports.
    pub reports_dir: PathBuf,
    pub stage: Stage,
    /// Value of the `baseUrl` collection variable.
    pub base_url: String,
    /// Literal request URL written into each collection item.
    pub request_url: String,
    /// Models used when discovery finds nothing. Empty means the built-in table.
    pub fallback: Vec<ModelEntry>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("source_folder"),
            dest_root: PathBuf::from("renaming_jsons"),
            collections_dir: PathBuf::from("postman_collections"),
            reports_dir: PathBuf::from("reports"),
            stage: Stage::Regression,
            base_url: "http://localhost:8080".to_string(),
            request_url: "http://localhost:8080/claims/validate".to_string(),
            fallback: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| DiscoveryError::Toml {
            origin: origin.to_string(),
            source,
        })
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DiscoveryError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Loads configuration following the documented resolution order.
    ///
    /// Returns the configuration and the file it came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match resolve_config_path(explicit) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                tracing::debug!(path = %path.display(), "loaded configuration");
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Discovery layout derived from this configuration.
    pub fn layout(&self) -> DiscoveryLayout {
        DiscoveryLayout::new(&self.dest_root).with_stage(self.stage)
    }
}

/// Picks the configuration file to read, if any.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}
