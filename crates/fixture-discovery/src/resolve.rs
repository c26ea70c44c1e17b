//! Fallback model resolution.
//!
//! When discovery yields nothing for a category, the pipeline falls back to
//! a static table of known models. The table is an ordinary value passed in
//! by the caller; there is no process-wide copy.

use fixture_model::{Category, ModelDescriptor, ModelEntry};
use serde::Deserialize;
use tracing::info;

use crate::discovery::{Discovery, DiscoveryOutcome};
use crate::error::{DiscoveryError, Result};

const BUILTIN_FALLBACK: &str = include_str!("../data/fallback_models.toml");

#[derive(Debug, Deserialize)]
struct FallbackFile {
    #[serde(default)]
    model: Vec<ModelEntry>,
}

/// Immutable table of statically configured models.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    models: Vec<ModelDescriptor>,
}

impl FallbackTable {
    /// Validates entries into a table.
    pub fn from_entries(entries: Vec<ModelEntry>) -> Result<Self> {
        let models = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                ModelDescriptor::from_entry(entry)
                    .map_err(|source| DiscoveryError::InvalidFallback { index, source })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { models })
    }

    /// Parses a table from TOML with one `[[model]]` array.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let file: FallbackFile = toml::from_str(text).map_err(|source| DiscoveryError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_entries(file.model)
    }

    /// The table shipped with the tool.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_FALLBACK, "built-in fallback table")
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Models configured for one category, in table order.
    pub fn for_category(&self, category: Category) -> Vec<ModelDescriptor> {
        self.models
            .iter()
            .filter(|model| model.category() == category)
            .cloned()
            .collect()
    }
}

/// Where a resolved model list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Discovered,
    /// Discovery found nothing usable; `reason` says what it saw instead.
    Fallback { reason: DiscoveryOutcome },
}

/// Models selected for processing, tagged with their source.
#[derive(Debug, Clone)]
pub struct ResolvedModels {
    pub models: Vec<ModelDescriptor>,
    pub source: ModelSource,
}

impl ResolvedModels {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ModelSource::Fallback { .. })
    }
}

/// Uses discovered models when there are any, else the fallback entries
/// for `category`.
pub fn resolve_models(
    discovery: Discovery,
    fallback: &FallbackTable,
    category: Category,
) -> ResolvedModels {
    let outcome = discovery.outcome();
    if outcome.has_models() {
        return ResolvedModels {
            models: discovery.models,
            source: ModelSource::Discovered,
        };
    }

    let models = fallback.for_category(category);
    info!(
        category = category.as_str(),
        reason = %outcome.describe(),
        fallback_models = models.len(),
        "no suites discovered, using fallback table"
    );
    ResolvedModels {
        models,
        source: ModelSource::Fallback { reason: outcome },
    }
}
