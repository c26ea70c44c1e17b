use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use fixture_discovery::{FallbackTable, ModelSource, ToolConfig};
use fixture_model::{Category, ModelDescriptor, ModelEntry};
use fixture_output::{
    CollectionTarget, CollectionValidation, DirectoryStats, TimingReport, directory_stats,
    emit_collection, validate_collection,
};
use fixture_transform::RenameOptions;
use tracing::{debug, info, info_span};

use fixture_cli::pipeline::{
    PipelineSettings, SuiteSelection, fallback_table, list_categories, process_models,
    resolve_category, select_models,
};
use fixture_cli::types::{ListResult, ProcessResult};

use crate::cli::{
    CollectionArgs, CustomArgs, ListArgs, ProcessArgs, RunArgs, StatsArgs, ValidateArgs,
};

pub fn load_config(explicit: Option<&Path>) -> Result<ToolConfig> {
    let (config, path) = ToolConfig::load(explicit).context("load configuration")?;
    match &path {
        Some(path) => info!(path = %path.display(), "configuration loaded"),
        None => debug!("no configuration file, using defaults"),
    }
    Ok(config)
}

fn settings_for(config: &ToolConfig, run: RunArgs) -> PipelineSettings {
    PipelineSettings {
        rename: RenameOptions {
            dry_run: run.dry_run,
            keep_source: run.keep_source,
        },
        emit_collection: !run.no_collection,
        ..PipelineSettings::from_config(config)
    }
}

fn load_fallback(config: &ToolConfig) -> Result<FallbackTable> {
    fallback_table(config).context("load fallback models")
}

pub fn run_list(args: &ListArgs, config: &ToolConfig) -> Result<ListResult> {
    let source_root = args.source_root.as_ref().unwrap_or(&config.source_root);
    let fallback = load_fallback(config)?;
    let categories: Vec<Category> = if args.categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        args.categories.iter().copied().map(Category::from).collect()
    };
    Ok(list_categories(source_root, &categories, config, &fallback))
}

pub fn run_process(args: &ProcessArgs, config: &ToolConfig) -> Result<ProcessResult> {
    let category = Category::from(args.category);
    let span = info_span!("process", category = category.as_str());
    let _guard = span.enter();
    let start = Instant::now();

    let source_root = args.source_root.as_ref().unwrap_or(&config.source_root);
    let fallback = load_fallback(config)?;
    let listing = resolve_category(source_root, category, config, &fallback)
        .with_context(|| format!("discover {category} suites under {}", source_root.display()))?;

    let selection = if args.selection.all {
        SuiteSelection::All
    } else {
        SuiteSelection::Suites(args.selection.suites.clone())
    };
    let (models, missing_suites) = select_models(&listing.models, &selection);
    info!(
        selected = models.len(),
        missing = missing_suites.len(),
        fallback = listing.source != ModelSource::Discovered,
        "suites selected"
    );

    let settings = settings_for(config, args.run);
    let mut rng = rand::thread_rng();
    let (results, report) = process_models(&models, &settings, &mut rng);
    let report_path = write_report(
        &report,
        config,
        category.lob(),
        args.no_report || args.run.dry_run,
    )?;

    info!(
        models = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "processing finished"
    );
    Ok(ProcessResult {
        category,
        source: Some(listing.source),
        models: results,
        missing_suites,
        report: report_path,
        dry_run: args.run.dry_run,
    })
}

fn custom_model(args: &CustomArgs, config: &ToolConfig) -> Result<ModelDescriptor> {
    let category = Category::from(args.category);
    let dest_dir = args.dest_dir.clone().unwrap_or_else(|| {
        config
            .dest_root
            .join(category.dest_subdir())
            .join(format!("custom_{}_{}", args.edit_id, args.eob_code))
    });
    ModelDescriptor::from_entry(ModelEntry {
        category,
        suite_number: args.suite.clone(),
        edit_id: args.edit_id.clone(),
        eob_code: args.eob_code.clone(),
        display_name: None,
        folder_name: None,
        source_dir: args.source_dir.clone(),
        dest_dir,
        collection_name: args.collection_name.clone(),
        collection_file_name: None,
    })
    .context("invalid custom model")
}

pub fn run_custom(args: &CustomArgs, config: &ToolConfig) -> Result<ProcessResult> {
    let model = custom_model(args, config)?;
    let span = info_span!("custom", edit = %model.edit_identifier(), eob = %model.eob_code());
    let _guard = span.enter();

    let settings = settings_for(config, args.run);
    let mut rng = rand::thread_rng();
    let (results, report) = process_models(std::slice::from_ref(&model), &settings, &mut rng);
    let label = format!("{}_{}", model.edit_identifier(), model.eob_code());
    let report_path = write_report(&report, config, &label, args.run.dry_run)?;

    Ok(ProcessResult {
        category: model.category(),
        source: None,
        models: results,
        missing_suites: Vec::new(),
        report: report_path,
        dry_run: args.run.dry_run,
    })
}

fn write_report(
    report: &TimingReport,
    config: &ToolConfig,
    label: &str,
    skip: bool,
) -> Result<Option<PathBuf>> {
    if skip || report.is_empty() {
        return Ok(None);
    }
    let path = report
        .write_csv(&config.reports_dir, label)
        .with_context(|| format!("write timing report to {}", config.reports_dir.display()))?;
    Ok(Some(path))
}

pub fn run_collection(args: &CollectionArgs, config: &ToolConfig) -> Result<Option<PathBuf>> {
    let family = Category::from(args.category).payload_family();
    let root = args.output_dir.as_ref().unwrap_or(&config.collections_dir);
    let target = CollectionTarget::custom(&args.name, family, root);
    let settings = PipelineSettings::from_config(config);
    emit_collection(&args.dir, &target, &settings.collection)
        .with_context(|| format!("build collection for {}", args.dir.display()))
}

pub fn run_stats(args: &StatsArgs) -> Result<DirectoryStats> {
    directory_stats(&args.dir).with_context(|| format!("read {}", args.dir.display()))
}

pub fn run_validate(args: &ValidateArgs) -> CollectionValidation {
    validate_collection(&args.collection)
}
