use std::path::PathBuf;

use fixture_discovery::ModelSource;
use fixture_model::{Category, ModelDescriptor};
use fixture_output::RecordStatus;

/// Result of running one model through the pipeline.
#[derive(Debug)]
pub struct ModelResult {
    pub model: ModelDescriptor,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub collection: Option<PathBuf>,
    pub naming_ms: f64,
    pub collection_ms: f64,
    pub errors: Vec<String>,
}

impl ModelResult {
    pub fn new(model: ModelDescriptor) -> Self {
        Self {
            model,
            renamed: 0,
            skipped: 0,
            failed: 0,
            collection: None,
            naming_ms: 0.0,
            collection_ms: 0.0,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.failed > 0 || !self.errors.is_empty()
    }

    pub fn status(&self) -> RecordStatus {
        if self.has_errors() {
            RecordStatus::Failed
        } else {
            RecordStatus::Success
        }
    }
}

/// Result of a `process` or `custom` run.
#[derive(Debug)]
pub struct ProcessResult {
    pub category: Category,
    /// `None` for hand-specified models.
    pub source: Option<ModelSource>,
    pub models: Vec<ModelResult>,
    /// Requested suite numbers with no matching model.
    pub missing_suites: Vec<String>,
    pub report: Option<PathBuf>,
    pub dry_run: bool,
}

impl ProcessResult {
    pub fn has_errors(&self) -> bool {
        !self.missing_suites.is_empty() || self.models.iter().any(ModelResult::has_errors)
    }

    pub fn total_renamed(&self) -> usize {
        self.models.iter().map(|model| model.renamed).sum()
    }
}

/// One category's entry in the `list` output.
#[derive(Debug)]
pub struct CategoryListing {
    pub category: Category,
    pub source: ModelSource,
    pub models: Vec<ModelDescriptor>,
    /// Folder names that looked like suites but carried a bad suite number.
    pub malformed: Vec<String>,
}

/// Output of the `list` command.
#[derive(Debug, Default)]
pub struct ListResult {
    pub listings: Vec<CategoryListing>,
    /// Categories whose discovery failed, with the error.
    pub errors: Vec<(Category, String)>,
}
