//! Rename planning and execution.
//!
//! Renaming is split in two: [`plan_renames`] reads the source directory and
//! decides every target name without touching anything, [`apply_renames`]
//! copies, mutates and removes. A failure on one file is recorded and the
//! rest of the batch continues.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fixture_model::{ModelDescriptor, OutcomeCode};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Result, TransformError};
use crate::mutate::{MutationReport, PayloadMutation, mutate_file};
use crate::name::TestCaseName;

/// One file to rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub source: PathBuf,
    pub target: PathBuf,
    pub original_name: String,
    pub target_name: String,
    pub code: OutcomeCode,
}

/// Why a source file is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameSkip {
    /// Not 3, 4 or 5 `#`-separated parts.
    Unrecognized { file_name: String },
    /// A five-part name made for another edit/eob pair.
    ForeignModel {
        file_name: String,
        edit: String,
        eob: String,
    },
    /// An earlier file in the batch already renames to the same target.
    TargetCollision { file_name: String, target: String },
}

/// Renames decided for one model.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub mutation: PayloadMutation,
    pub entries: Vec<RenameEntry>,
    pub skipped: Vec<RenameSkip>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Execution switches for [`apply_renames`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    /// Log what would happen, touch nothing.
    pub dry_run: bool,
    /// Leave the source file in place after copying.
    pub keep_source: bool,
}

/// A file that was renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
    pub original_name: String,
    pub path: PathBuf,
    /// `None` when the payload could not be mutated.
    pub mutation: Option<MutationReport>,
    /// The copy succeeded but the source could not be removed.
    pub source_kept: bool,
}

/// A file that could not be renamed.
#[derive(Debug)]
pub struct FailedRename {
    pub file_name: String,
    pub error: TransformError,
}

/// Result of applying a plan.
#[derive(Debug, Default)]
pub struct RenameOutcome {
    pub renamed: Vec<RenamedFile>,
    pub failed: Vec<FailedRename>,
}

impl RenameOutcome {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Plans renames for every JSON file in the model's source directory.
pub fn plan_renames(model: &ModelDescriptor) -> Result<RenamePlan> {
    plan_renames_in(
        model.source_path(),
        model.dest_path(),
        model.edit_identifier(),
        model.eob_code(),
        PayloadMutation::for_category(model.category()),
    )
}

/// Plans renames for an explicit source/destination pair.
pub fn plan_renames_in(
    source_dir: &Path,
    dest_dir: &Path,
    edit: &str,
    eob: &str,
    mutation: PayloadMutation,
) -> Result<RenamePlan> {
    if !source_dir.is_dir() {
        return Err(TransformError::SourceMissing {
            path: source_dir.to_path_buf(),
        });
    }

    let mut file_names = list_json_files(source_dir)?;
    file_names.sort();

    let mut plan = RenamePlan {
        source_dir: source_dir.to_path_buf(),
        dest_dir: dest_dir.to_path_buf(),
        mutation,
        entries: Vec::new(),
        skipped: Vec::new(),
    };
    let mut planned_targets: HashSet<String> = HashSet::new();

    for file_name in file_names {
        let Some(name) = TestCaseName::parse(&file_name) else {
            warn!(file = %file_name, "unrecognized test-case name, expected 3, 4 or 5 parts");
            plan.skipped.push(RenameSkip::Unrecognized { file_name });
            continue;
        };

        if name.belongs_to_other_model(edit, eob) {
            let file_edit = name.edit.clone().unwrap_or_default();
            let file_eob = name.eob.clone().unwrap_or_default();
            warn!(
                file = %file_name,
                file_model = %format!("{file_edit}_{file_eob}"),
                target_model = %format!("{edit}_{eob}"),
                "test case belongs to a different model"
            );
            plan.skipped.push(RenameSkip::ForeignModel {
                file_name,
                edit: file_edit,
                eob: file_eob,
            });
            continue;
        }

        if name.has_unknown_suffix() {
            warn!(file = %file_name, suffix = %name.suffix, "unknown suffix, treating as exclusion");
        }

        let target_name = name.target_name(edit, eob);
        if !planned_targets.insert(target_name.clone()) {
            warn!(
                file = %file_name,
                target = %target_name,
                "another test case already maps to this name, source left in place"
            );
            plan.skipped.push(RenameSkip::TargetCollision {
                file_name,
                target: target_name,
            });
            continue;
        }
        plan.entries.push(RenameEntry {
            source: source_dir.join(&file_name),
            target: dest_dir.join(&target_name),
            original_name: file_name,
            target_name,
            code: name.outcome_code(),
        });
    }

    Ok(plan)
}

fn list_json_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| TransformError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| TransformError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && let Some(name) = entry.file_name().to_str() {
            files.push(name.to_string());
        }
    }
    Ok(files)
}

/// Executes a plan.
///
/// The destination directory is created first; its failure is the only
/// error that aborts the whole plan.
pub fn apply_renames<R: Rng + ?Sized>(
    plan: &RenamePlan,
    options: RenameOptions,
    rng: &mut R,
) -> Result<RenameOutcome> {
    let mut outcome = RenameOutcome::default();

    if options.dry_run {
        for entry in &plan.entries {
            info!(from = %entry.original_name, to = %entry.target_name, "dry run: would rename");
            outcome.renamed.push(RenamedFile {
                original_name: entry.original_name.clone(),
                path: entry.target.clone(),
                mutation: None,
                source_kept: false,
            });
        }
        return Ok(outcome);
    }

    std::fs::create_dir_all(&plan.dest_dir).map_err(|e| TransformError::CreateDir {
        path: plan.dest_dir.clone(),
        source: e,
    })?;

    for entry in &plan.entries {
        match apply_entry(entry, plan.mutation, options, rng) {
            Ok(renamed) => outcome.renamed.push(renamed),
            Err(error) => {
                warn!(file = %entry.original_name, %error, "rename failed");
                outcome.failed.push(FailedRename {
                    file_name: entry.original_name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        dest = %plan.dest_dir.display(),
        renamed = outcome.renamed.len(),
        failed = outcome.failed.len(),
        skipped = plan.skipped.len(),
        "renaming finished"
    );
    Ok(outcome)
}

fn apply_entry<R: Rng + ?Sized>(
    entry: &RenameEntry,
    mutation: PayloadMutation,
    options: RenameOptions,
    rng: &mut R,
) -> Result<RenamedFile> {
    std::fs::copy(&entry.source, &entry.target).map_err(|e| TransformError::Copy {
        from: entry.source.clone(),
        to: entry.target.clone(),
        source: e,
    })?;

    // A payload that cannot be mutated is still renamed.
    let report = match mutate_file(&entry.target, mutation, rng) {
        Ok(report) => Some(report),
        Err(error) => {
            warn!(file = %entry.target_name, %error, "payload mutation failed");
            None
        }
    };

    let source_kept = release_source(entry, options);

    debug!(from = %entry.original_name, to = %entry.target_name, "renamed");
    Ok(RenamedFile {
        original_name: entry.original_name.clone(),
        path: entry.target.clone(),
        mutation: report,
        source_kept,
    })
}

/// Removes the source after a successful copy. Returns `true` when the
/// source is still on disk. The target is complete at this point, so a
/// failed removal is logged and the file still counts as renamed.
fn release_source(entry: &RenameEntry, options: RenameOptions) -> bool {
    if options.keep_source {
        return false;
    }
    match remove_source(&entry.source) {
        Ok(()) => false,
        Err(error) => {
            warn!(file = %entry.original_name, %error, "renamed, but the source was kept");
            true
        }
    }
}

fn remove_source(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| TransformError::Remove {
        path: path.to_path_buf(),
        source: e,
    })
}
