//! Model descriptors.
//!
//! A [`ModelDescriptor`] is everything the pipeline needs to process one
//! suite: where its files are, where they go, and what the renamed files and
//! generated collection are called. Descriptors are immutable once built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{ModelError, Result};
use crate::suite::SuiteNumber;

/// Serializable description of a model, as written in a fallback table or
/// produced by discovery before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub category: Category,
    pub suite_number: String,
    pub edit_id: String,
    pub eob_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_file_name: Option<String>,
}

/// A validated, immutable model description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    suite: SuiteNumber,
    category: Category,
    edit_identifier: String,
    eob_code: String,
    display_name: String,
    folder_name: String,
    source_path: PathBuf,
    dest_path: PathBuf,
    collection_name: String,
    collection_file_name: String,
}

impl ModelDescriptor {
    /// Builds a descriptor from an entry, filling derived names.
    ///
    /// The suite number is validated and normalized; edit and eob codes must
    /// be non-empty. Paths are not checked here, see [`ModelDescriptor::validate`].
    pub fn from_entry(entry: ModelEntry) -> Result<Self> {
        let suite = SuiteNumber::parse(entry.suite_number.trim())?;
        let edit_identifier = non_empty(entry.edit_id, "edit_id")?;
        let eob_code = non_empty(entry.eob_code, "eob_code")?;

        let display_name = entry
            .display_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| entry.category.label().to_string());
        let folder_name = entry.folder_name.unwrap_or_else(|| {
            format!(
                "{}_{}_{}_{}_{}_{}",
                entry.category.suite_prefix(),
                suite.as_str(),
                display_name.replace(' ', "_"),
                entry.category.folder_token(),
                edit_identifier,
                eob_code
            )
        });
        let collection_name = entry
            .collection_name
            .unwrap_or_else(|| strip_source_marker(&folder_name).to_string());
        let collection_file_name = entry.collection_file_name.unwrap_or_else(|| {
            collection_file_name(&display_name, entry.category, &edit_identifier, &eob_code)
        });

        Ok(Self {
            suite,
            category: entry.category,
            edit_identifier,
            eob_code,
            display_name,
            folder_name,
            source_path: entry.source_dir,
            dest_path: entry.dest_dir,
            collection_name,
            collection_file_name,
        })
    }

    /// Normalized suite number (`"07"`).
    pub fn suite_number(&self) -> &str {
        self.suite.as_str()
    }

    /// Suite number as it appeared in the folder name (`"7"`).
    pub fn raw_suite_number(&self) -> &str {
        self.suite.raw()
    }

    pub fn suite(&self) -> &SuiteNumber {
        &self.suite
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn edit_identifier(&self) -> &str {
        &self.edit_identifier
    }

    pub fn eob_code(&self) -> &str {
        &self.eob_code
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn collection_file_name(&self) -> &str {
        &self.collection_file_name
    }

    /// Checks that the source directory exists.
    pub fn validate(&self) -> Result<()> {
        if self.source_path.is_dir() {
            Ok(())
        } else {
            Err(ModelError::SourceMissing {
                path: self.source_path.clone(),
            })
        }
    }

    /// Converts back into a serializable entry with every name filled.
    pub fn to_entry(&self) -> ModelEntry {
        ModelEntry {
            category: self.category,
            suite_number: self.suite.raw().to_string(),
            edit_id: self.edit_identifier.clone(),
            eob_code: self.eob_code.clone(),
            display_name: Some(self.display_name.clone()),
            folder_name: Some(self.folder_name.clone()),
            source_dir: self.source_path.clone(),
            dest_dir: self.dest_path.clone(),
            collection_name: Some(self.collection_name.clone()),
            collection_file_name: Some(self.collection_file_name.clone()),
        }
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Removes a trailing `_payloads_sur`, `_ayloads_sur` or `_sur` marker.
pub fn strip_source_marker(folder_name: &str) -> &str {
    ["_payloads_sur", "_ayloads_sur", "_sur"]
        .iter()
        .find_map(|marker| folder_name.strip_suffix(marker))
        .unwrap_or(folder_name)
}

/// Builds `<display>_<lob>_<edit>_<eob>.json`, lower-cased, spaces as `_`.
pub fn collection_file_name(
    display_name: &str,
    category: Category,
    edit_identifier: &str,
    eob_code: &str,
) -> String {
    format!(
        "{}_{}_{}_{}.json",
        display_name.trim().replace(' ', "_"),
        category.folder_token(),
        edit_identifier,
        eob_code
    )
    .to_lowercase()
}

/// Returns suite numbers that occur more than once within a category,
/// together with how many descriptors share them.
pub fn duplicate_suite_numbers(models: &[ModelDescriptor]) -> Vec<(Category, String, usize)> {
    let mut counts: BTreeMap<(Category, &str), usize> = BTreeMap::new();
    for model in models {
        *counts
            .entry((model.category(), model.suite_number()))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((category, suite), count)| (category, suite.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(suite: &str) -> ModelEntry {
        ModelEntry {
            category: Category::WgsCsbd,
            suite_number: suite.to_string(),
            edit_id: "RULEX00001".to_string(),
            eob_code: "00W28".to_string(),
            display_name: Some("Revenue Code".to_string()),
            folder_name: Some(format!("CSBDTS_{suite}_Revenue_Code_WGS_CSBD_RULEX00001_00W28_sur")),
            source_dir: PathBuf::from("src"),
            dest_dir: PathBuf::from("dst"),
            collection_name: None,
            collection_file_name: None,
        }
    }

    #[test]
    fn test_from_entry_derives_names() {
        let model = ModelDescriptor::from_entry(entry("7")).unwrap();
        assert_eq!(model.suite_number(), "07");
        assert_eq!(model.raw_suite_number(), "7");
        assert_eq!(
            model.collection_name(),
            "CSBDTS_7_Revenue_Code_WGS_CSBD_RULEX00001_00W28"
        );
        assert_eq!(
            model.collection_file_name(),
            "revenue_code_wgs_csbd_rulex00001_00w28.json"
        );
    }

    #[test]
    fn test_from_entry_rejects_blank_edit() {
        let mut bad = entry("7");
        bad.edit_id = "  ".to_string();
        assert!(matches!(
            ModelDescriptor::from_entry(bad),
            Err(ModelError::EmptyField { field: "edit_id" })
        ));
    }

    #[test]
    fn test_strip_source_marker() {
        assert_eq!(strip_source_marker("TS_01_X_payloads_sur"), "TS_01_X");
        assert_eq!(strip_source_marker("TS_01_X_ayloads_sur"), "TS_01_X");
        assert_eq!(strip_source_marker("TS_01_X_sur"), "TS_01_X");
        assert_eq!(strip_source_marker("TS_01_X"), "TS_01_X");
    }

    #[test]
    fn test_duplicates_reported() {
        let models = vec![
            ModelDescriptor::from_entry(entry("7")).unwrap(),
            ModelDescriptor::from_entry(entry("07")).unwrap(),
            ModelDescriptor::from_entry(entry("8")).unwrap(),
        ];
        let dups = duplicate_suite_numbers(&models);
        assert_eq!(dups, vec![(Category::WgsCsbd, "07".to_string(), 2)]);
    }
}
