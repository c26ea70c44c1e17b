//! Collection validation and destination directory statistics.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use fixture_transform::RenamedCase;
use serde::Serialize;
use serde_json::Value;

use crate::error::{OutputError, Result};
use crate::postman::collect_json_files;

const V2_1_FIELDS: &[&str] = &["info", "item"];
const FLAT_FIELDS: &[&str] = &["version", "name", "type", "items"];

/// Result of checking a collection file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_requests: usize,
}

/// Checks that a collection file has the fields Postman needs.
///
/// Accepts v2.1 collections (`info` + `item`) and the older flat layout
/// (`version`, `name`, `type`, `items`). Never fails: problems are reported
/// in the returned value.
pub fn validate_collection(path: &Path) -> CollectionValidation {
    let mut result = CollectionValidation::default();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            result.errors.push(format!("Validation error: {error}"));
            return result;
        }
    };
    let collection: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(error) => {
            result.errors.push(format!("Invalid JSON format: {error}"));
            return result;
        }
    };

    let (required, items_key) =
        if collection.get("info").is_some() && collection.get("item").is_some() {
            (V2_1_FIELDS, "item")
        } else {
            (FLAT_FIELDS, "items")
        };

    for field in required {
        if collection.get(*field).is_none() {
            result.errors.push(format!("Missing required field: {field}"));
        }
    }
    result.total_requests = collection
        .get(items_key)
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if result.total_requests == 0 {
        result
            .warnings
            .push("Collection contains no requests".to_string());
    }
    result.valid = result.errors.is_empty();
    result
}

/// Counts of renamed test cases under a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub directory: PathBuf,
    /// Every `.json` file, renamed or not.
    pub total_files: usize,
    /// Renamed files per outcome code.
    pub by_outcome: BTreeMap<String, usize>,
    pub edit_ids: BTreeSet<String>,
    pub eob_codes: BTreeSet<String>,
}

impl DirectoryStats {
    pub fn renamed_files(&self) -> usize {
        self.by_outcome.values().sum()
    }
}

/// Gathers statistics for the renamed test cases under `dir`, recursively.
pub fn directory_stats(dir: &Path) -> Result<DirectoryStats> {
    if !dir.is_dir() {
        return Err(OutputError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let files = collect_json_files(dir)?;
    let mut stats = DirectoryStats {
        directory: dir.to_path_buf(),
        total_files: files.len(),
        ..DirectoryStats::default()
    };

    for case in files
        .iter()
        .filter_map(|path| path.file_name()?.to_str())
        .filter_map(RenamedCase::parse)
    {
        *stats
            .by_outcome
            .entry(case.code.as_str().to_string())
            .or_default() += 1;
        stats.edit_ids.insert(case.edit);
        stats.eob_codes.insert(case.eob);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_flat_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");
        fs::write(&path, r#"{"version":"1","name":"x","type":"collection","items":[{}]}"#).unwrap();
        let result = validate_collection(&path);
        assert!(result.valid);
        assert_eq!(result.total_requests, 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");
        fs::write(&path, r#"{"name":"x"}"#).unwrap();
        let result = validate_collection(&path);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Missing required field: version",
                "Missing required field: type",
                "Missing required field: items"
            ]
        );
        assert_eq!(result.warnings, vec!["Collection contains no requests"]);
    }

    #[test]
    fn test_validate_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");
        fs::write(&path, "{").unwrap();
        let result = validate_collection(&path);
        assert!(!result.valid);
        assert!(result.errors[0].starts_with("Invalid JSON format"));
    }

    #[test]
    fn test_stats_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            directory_stats(&dir.path().join("none")),
            Err(OutputError::DirectoryNotFound { .. })
        ));
    }
}
