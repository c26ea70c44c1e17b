//! Processing pipeline shared by the `list`, `process` and `custom` commands.
//!
//! Stages per category: discover suites, fall back to the static table when
//! nothing usable is found, select suites, then rename, mutate and collect
//! each model. A failing model is recorded and the batch moves on.

use std::path::{Path, PathBuf};
use std::time::Instant;

use fixture_discovery::{
    CategoryFilter, FallbackTable, ToolConfig, discover_with_layout, lookup_by_suite_number,
    resolve_models,
};
use fixture_model::{Category, ModelDescriptor};
use fixture_output::{
    CollectionSettings, CollectionTarget, TimingRecord, TimingReport, emit_collection,
};
use fixture_transform::{RenameOptions, apply_renames, plan_renames};
use rand::Rng;
use tracing::{debug, error, info, info_span, warn};

use crate::types::{CategoryListing, ListResult, ModelResult};

/// Settings applied to every model of a run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub collections_root: PathBuf,
    pub collection: CollectionSettings,
    pub rename: RenameOptions,
    pub emit_collection: bool,
}

impl PipelineSettings {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            collections_root: config.collections_dir.clone(),
            collection: CollectionSettings {
                base_url: config.base_url.clone(),
                request_url: config.request_url.clone(),
            },
            rename: RenameOptions::default(),
            emit_collection: true,
        }
    }
}

/// Which suites of a category to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteSelection {
    All,
    Suites(Vec<String>),
}

/// Fallback models from the configuration, or the built-in table when the
/// configuration has none.
pub fn fallback_table(config: &ToolConfig) -> fixture_discovery::Result<FallbackTable> {
    if config.fallback.is_empty() {
        FallbackTable::builtin()
    } else {
        FallbackTable::from_entries(config.fallback.clone())
    }
}

/// Discovers the suites of `category` under `source_root` and resolves them
/// against the fallback table.
pub fn resolve_category(
    source_root: &Path,
    category: Category,
    config: &ToolConfig,
    fallback: &FallbackTable,
) -> fixture_discovery::Result<CategoryListing> {
    let root = source_root.join(category.source_subdir());
    debug!(category = category.as_str(), root = %root.display(), "discovering suites");
    let discovery =
        discover_with_layout(&root, CategoryFilter::Only(category), &config.layout())?;
    let malformed = discovery
        .malformed()
        .map(|entry| entry.name.clone())
        .collect();
    let resolved = resolve_models(discovery, fallback, category);
    Ok(CategoryListing {
        category,
        source: resolved.source,
        models: resolved.models,
        malformed,
    })
}

/// Resolves every category in turn. A category whose discovery fails is
/// recorded in [`ListResult::errors`] and the rest are still listed.
pub fn list_categories(
    source_root: &Path,
    categories: &[Category],
    config: &ToolConfig,
    fallback: &FallbackTable,
) -> ListResult {
    let mut result = ListResult::default();
    for &category in categories {
        match resolve_category(source_root, category, config, fallback) {
            Ok(listing) => result.listings.push(listing),
            Err(err) => {
                error!(category = category.as_str(), error = %err, "discovery failed, category skipped");
                result.errors.push((category, err.to_string()));
            }
        }
    }
    result
}

/// Picks the requested suites. Returns the selected models and the suite
/// numbers that matched nothing.
pub fn select_models(
    models: &[ModelDescriptor],
    selection: &SuiteSelection,
) -> (Vec<ModelDescriptor>, Vec<String>) {
    let queries = match selection {
        SuiteSelection::All => return (models.to_vec(), Vec::new()),
        SuiteSelection::Suites(queries) => queries,
    };

    let mut selected: Vec<ModelDescriptor> = Vec::new();
    let mut missing = Vec::new();
    for query in queries {
        match lookup_by_suite_number(models, query) {
            Some(model) => {
                if selected
                    .iter()
                    .any(|existing| existing.folder_name() == model.folder_name())
                {
                    debug!(suite = %query, "suite requested more than once");
                    continue;
                }
                selected.push(model.clone());
            }
            None => {
                warn!(suite = %query, "no model with this suite number");
                missing.push(query.clone());
            }
        }
    }
    (selected, missing)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Renames, mutates and collects one model.
pub fn process_model<R: Rng + ?Sized>(
    model: &ModelDescriptor,
    settings: &PipelineSettings,
    rng: &mut R,
) -> ModelResult {
    let span = info_span!(
        "model",
        suite = %model.suite_number(),
        edit = %model.edit_identifier(),
        eob = %model.eob_code()
    );
    let _guard = span.enter();
    let mut result = ModelResult::new(model.clone());

    let naming_start = Instant::now();
    if let Err(error) = model.validate() {
        warn!(%error, "model skipped");
        result.errors.push(error.to_string());
        return result;
    }
    let plan = match plan_renames(model) {
        Ok(plan) => plan,
        Err(error) => {
            warn!(%error, "rename planning failed");
            result.errors.push(error.to_string());
            return result;
        }
    };
    result.skipped = plan.skipped.len();
    match apply_renames(&plan, settings.rename, rng) {
        Ok(outcome) => {
            result.renamed = outcome.renamed_count();
            result.failed = outcome.failed.len();
            result.errors.extend(
                outcome
                    .failed
                    .iter()
                    .map(|failure| format!("{}: {}", failure.file_name, failure.error)),
            );
        }
        Err(error) => {
            warn!(%error, "renaming failed");
            result.errors.push(error.to_string());
            result.naming_ms = elapsed_ms(naming_start);
            return result;
        }
    }
    result.naming_ms = elapsed_ms(naming_start);

    if settings.emit_collection && !settings.rename.dry_run {
        let collection_start = Instant::now();
        let target = CollectionTarget::for_model(model, &settings.collections_root);
        match emit_collection(model.dest_path(), &target, &settings.collection) {
            Ok(path) => result.collection = path,
            Err(error) => {
                warn!(%error, "collection generation failed");
                result.errors.push(error.to_string());
            }
        }
        result.collection_ms = elapsed_ms(collection_start);
    }

    info!(
        renamed = result.renamed,
        skipped = result.skipped,
        failed = result.failed,
        naming_ms = result.naming_ms,
        collection_ms = result.collection_ms,
        "model processed"
    );
    result
}

/// Processes every model in order and records one timing row per model.
pub fn process_models<R: Rng + ?Sized>(
    models: &[ModelDescriptor],
    settings: &PipelineSettings,
    rng: &mut R,
) -> (Vec<ModelResult>, TimingReport) {
    let mut results = Vec::with_capacity(models.len());
    let mut report = TimingReport::new();
    for model in models {
        let result = process_model(model, settings, rng);
        report.push(TimingRecord::for_model(
            &result.model,
            result.naming_ms,
            result.collection_ms,
            result.status(),
        ));
        results.push(result);
    }
    (results, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_model::ModelEntry;

    fn model(suite: &str, edit: &str) -> ModelDescriptor {
        ModelDescriptor::from_entry(ModelEntry {
            category: Category::WgsCsbd,
            suite_number: suite.to_string(),
            edit_id: edit.to_string(),
            eob_code: "00W5".to_string(),
            display_name: None,
            folder_name: None,
            source_dir: PathBuf::from("in"),
            dest_dir: PathBuf::from("out"),
            collection_name: None,
            collection_file_name: None,
        })
        .unwrap()
    }

    #[test]
    fn test_select_all() {
        let models = vec![model("1", "a"), model("2", "b")];
        let (selected, missing) = select_models(&models, &SuiteSelection::All);
        assert_eq!(selected.len(), 2);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_select_normalizes_and_reports_missing() {
        let models = vec![model("1", "a"), model("10", "b")];
        let selection = SuiteSelection::Suites(vec![
            "01".to_string(),
            "1".to_string(),
            "10".to_string(),
            "99".to_string(),
        ]);
        let (selected, missing) = select_models(&models, &selection);
        let suites: Vec<&str> = selected.iter().map(ModelDescriptor::suite_number).collect();
        assert_eq!(suites, vec!["01", "10"]);
        assert_eq!(missing, vec!["99"]);
    }

    #[test]
    fn test_config_fallback_replaces_builtin() {
        let mut config = ToolConfig::default();
        assert_eq!(fallback_table(&config).unwrap().models().len(), 6);

        config.fallback = vec![model("3", "rvn009").to_entry()];
        let table = fallback_table(&config).unwrap();
        assert_eq!(table.models().len(), 1);
        assert_eq!(table.models()[0].edit_identifier(), "rvn009");
    }

    #[test]
    fn test_missing_source_is_recorded_not_raised() {
        let settings = PipelineSettings::from_config(&ToolConfig::default());
        let mut rng = rand::thread_rng();
        let result = process_model(&model("4", "x"), &settings, &mut rng);
        assert!(result.has_errors());
        assert_eq!(result.renamed, 0);
        assert_eq!(result.errors.len(), 1);
    }
}
