//! Suite folder discovery.
//!
//! [`discover`] enumerates the immediate subdirectories of a root, matches
//! each name against the selected categories' naming patterns and builds a
//! [`ModelDescriptor`] per match. Names that match nothing are skipped
//! quietly; names that match but carry an unusable id are skipped loudly.

use std::path::{Path, PathBuf};

use fixture_model::{
    Category, ModelDescriptor, ModelEntry, duplicate_suite_numbers, is_valid_suite_number,
};
use tracing::{debug, info, warn};

use crate::config::DiscoveryLayout;
use crate::error::{DiscoveryError, Result};
use crate::patterns::{FolderMatch, PatternKind, dest_folder_name, display_name, match_folder};

/// Which categories a discovery run considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Only(Category),
    All,
}

impl CategoryFilter {
    pub fn categories(&self) -> &[Category] {
        match self {
            Self::Only(category) => std::slice::from_ref(category),
            Self::All => &Category::ALL,
        }
    }
}

/// Why a directory entry produced no descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The name matched no pattern of the selected categories.
    Unmatched,
    /// The name is shaped like a suite folder but its id is not 1-3 digits.
    InvalidSuiteNumber { value: String },
    /// The name is not valid UTF-8.
    NonUtf8,
}

/// A subdirectory that was looked at and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: SkipReason,
}

impl SkippedEntry {
    pub fn is_malformed(&self) -> bool {
        matches!(self.reason, SkipReason::InvalidSuiteNumber { .. })
    }
}

/// Summary of what a discovery run found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The root directory does not exist.
    RootMissing,
    /// The root exists but has no subdirectories.
    Empty,
    /// Subdirectories exist but none produced a descriptor.
    NoMatches { skipped: usize },
    /// Every matching folder produced a descriptor.
    Matched { count: usize },
    /// Some folders matched, others were malformed.
    MatchedWithWarnings { count: usize, malformed: usize },
}

impl DiscoveryOutcome {
    pub fn has_models(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::MatchedWithWarnings { .. })
    }

    /// Short description for log lines and summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::RootMissing => "source root does not exist".to_string(),
            Self::Empty => "source root has no subdirectories".to_string(),
            Self::NoMatches { skipped } => {
                format!("{skipped} subdirectories, none matched a suite pattern")
            }
            Self::Matched { count } => format!("{count} suites matched"),
            Self::MatchedWithWarnings { count, malformed } => {
                format!("{count} suites matched, {malformed} malformed")
            }
        }
    }
}

/// Result of a discovery run.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub models: Vec<ModelDescriptor>,
    pub skipped: Vec<SkippedEntry>,
    pub root_exists: bool,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn malformed(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped.iter().filter(|entry| entry.is_malformed())
    }

    pub fn outcome(&self) -> DiscoveryOutcome {
        if !self.root_exists {
            return DiscoveryOutcome::RootMissing;
        }
        let malformed = self.malformed().count();
        match (self.models.len(), self.skipped.len()) {
            (0, 0) => DiscoveryOutcome::Empty,
            (0, skipped) => DiscoveryOutcome::NoMatches { skipped },
            (count, _) if malformed == 0 => DiscoveryOutcome::Matched { count },
            (count, _) => DiscoveryOutcome::MatchedWithWarnings { count, malformed },
        }
    }
}

/// Discovers suites under `root` with the default layout.
pub fn discover(root: &Path, filter: CategoryFilter) -> Result<Discovery> {
    discover_with_layout(root, filter, &DiscoveryLayout::default())
}

/// Discovers suites under `root`, deriving destination paths from `layout`.
///
/// A missing root is not an error: the result is empty with
/// `root_exists == false`. A root that is a file is reported as
/// [`DiscoveryError::ReadDir`]. Entries are returned in enumeration order.
pub fn discover_with_layout(
    root: &Path,
    filter: CategoryFilter,
    layout: &DiscoveryLayout,
) -> Result<Discovery> {
    // A root that exists but is not a directory fails in `read_dir`.
    if !root.exists() {
        debug!(root = %root.display(), "discovery root not found");
        return Ok(Discovery::default());
    }

    let entries = std::fs::read_dir(root).map_err(|e| DiscoveryError::ReadDir {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut discovery = Discovery {
        root_exists: true,
        ..Discovery::default()
    };

    for entry_result in entries {
        let entry = entry_result.map_err(|e| DiscoveryError::ReadDir {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        // Files next to suite folders are ignored
        if !path.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!(path = %path.display(), "skipping non-UTF-8 folder name");
            discovery.skipped.push(SkippedEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                reason: SkipReason::NonUtf8,
            });
            continue;
        };

        let matched = filter
            .categories()
            .iter()
            .find_map(|category| match_folder(*category, &name).map(|m| (*category, m)));

        let Some((category, folder)) = matched else {
            debug!(folder = %name, "no suite pattern matched");
            discovery.skipped.push(SkippedEntry {
                name,
                reason: SkipReason::Unmatched,
            });
            continue;
        };

        if !is_valid_suite_number(folder.raw_id) {
            warn!(
                folder = %name,
                suite = folder.raw_id,
                "skipping suite folder with invalid suite number"
            );
            let value = folder.raw_id.to_string();
            discovery.skipped.push(SkippedEntry {
                name,
                reason: SkipReason::InvalidSuiteNumber { value },
            });
            continue;
        }

        let entry = build_entry(root, &name, category, &folder, layout);
        match ModelDescriptor::from_entry(entry) {
            Ok(model) => {
                debug!(
                    folder = %name,
                    category = category.as_str(),
                    suite = model.suite_number(),
                    edit_id = model.edit_identifier(),
                    eob_code = model.eob_code(),
                    "discovered suite"
                );
                discovery.models.push(model);
            }
            Err(error) => {
                warn!(folder = %name, %error, "skipping unusable suite folder");
                let value = folder.raw_id.to_string();
                discovery.skipped.push(SkippedEntry {
                    name,
                    reason: SkipReason::InvalidSuiteNumber { value },
                });
            }
        }
    }

    for (category, suite, count) in duplicate_suite_numbers(&discovery.models) {
        warn!(
            category = category.as_str(),
            suite = %suite,
            count,
            "duplicate suite number; all folders kept"
        );
    }

    info!(
        root = %root.display(),
        matched = discovery.models.len(),
        skipped = discovery.skipped.len(),
        "discovery finished"
    );
    Ok(discovery)
}

fn build_entry(
    root: &Path,
    name: &str,
    category: Category,
    folder: &FolderMatch<'_>,
    layout: &DiscoveryLayout,
) -> ModelEntry {
    let stage = layout.stage.as_str();
    let dest_name = dest_folder_name(name, folder.kind);
    let (source_dir, dest_dir): (PathBuf, PathBuf) = match folder.kind {
        PatternKind::LegacyRevenue => (
            root.join(name).join(stage),
            layout.dest_root.join(dest_name).join(stage),
        ),
        PatternKind::Prefixed | PatternKind::Bare => (
            root.join(name).join("payloads").join(stage),
            layout
                .dest_root
                .join(category.dest_subdir())
                .join(dest_name)
                .join("payloads")
                .join(stage),
        ),
    };

    // Legacy suites share the collection naming of the fallback table.
    let collection_name = match folder.kind {
        PatternKind::LegacyRevenue => Some(legacy_collection_name(folder.raw_id)),
        PatternKind::Prefixed | PatternKind::Bare => None,
    };

    ModelEntry {
        category,
        suite_number: folder.raw_id.to_string(),
        edit_id: folder.edit.to_string(),
        eob_code: folder.eob.to_string(),
        display_name: Some(display_name(folder.display)),
        folder_name: Some(name.to_string()),
        source_dir,
        dest_dir,
        collection_name,
        collection_file_name: None,
    }
}

/// `ts_<n>_collection` with the suite number's leading zeros dropped.
fn legacy_collection_name(raw_id: &str) -> String {
    let number = raw_id.trim_start_matches('0');
    let number = if number.is_empty() { "0" } else { number };
    format!("ts_{number}_collection")
}

/// Finds the first descriptor whose suite number matches `suite_number`
/// after normalization. `"7"` and `"07"` are equivalent.
pub fn lookup_by_suite_number<'a>(
    descriptors: &'a [ModelDescriptor],
    suite_number: &str,
) -> Option<&'a ModelDescriptor> {
    descriptors
        .iter()
        .find(|model| model.suite().matches(suite_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let discovery = discover(&dir.path().join("nope"), CategoryFilter::All).unwrap();
        assert!(discovery.is_empty());
        assert!(!discovery.root_exists);
        assert_eq!(discovery.outcome(), DiscoveryOutcome::RootMissing);
    }

    #[test]
    fn test_file_root_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("WGS_CSBD");
        fs::write(&file, "x").unwrap();
        let err = discover(&file, CategoryFilter::All).unwrap_err();
        assert!(matches!(err, DiscoveryError::ReadDir { ref path, .. } if path == &file));
    }

    #[test]
    fn test_legacy_collection_name() {
        assert_eq!(legacy_collection_name("03"), "ts_3_collection");
        assert_eq!(legacy_collection_name("12"), "ts_12_collection");
        assert_eq!(legacy_collection_name("00"), "ts_0_collection");
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let discovery = discover(dir.path(), CategoryFilter::All).unwrap();
        assert_eq!(discovery.outcome(), DiscoveryOutcome::Empty);
    }

    #[test]
    fn test_outcome_distinguishes_malformed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("CSBDTS_7_A_WGS_CSBD_R1_00W1_sur")).unwrap();
        fs::create_dir(dir.path().join("CSBDTS_1234_A_WGS_CSBD_R1_00W1_sur")).unwrap();
        let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
        assert_eq!(
            discovery.outcome(),
            DiscoveryOutcome::MatchedWithWarnings {
                count: 1,
                malformed: 1
            }
        );
    }

    #[test]
    fn test_filter_categories() {
        assert_eq!(
            CategoryFilter::Only(Category::GbdfGrs).categories(),
            &[Category::GbdfGrs]
        );
        assert_eq!(CategoryFilter::All.categories().len(), 4);
    }
}
