//! Timing reports.
//!
//! Each processed model contributes one [`TimingRecord`]. A session's
//! records are written as a CSV file that spreadsheet tools open directly.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use fixture_model::ModelDescriptor;
use serde::Serialize;
use tracing::info;

use crate::error::{OutputError, Result};

/// Outcome of processing one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordStatus {
    Success,
    Failed,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Failed => f.write_str("Failed"),
        }
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingRecord {
    #[serde(rename = "TC#ID")]
    pub tc_id: String,
    #[serde(rename = "Model LOB")]
    pub model_lob: String,
    #[serde(rename = "Model Name")]
    pub model_name: String,
    #[serde(rename = "Edit ID")]
    pub edit_id: String,
    #[serde(rename = "EOB Code")]
    pub eob_code: String,
    #[serde(rename = "Naming Convention Time (ms)")]
    pub naming_ms: f64,
    #[serde(rename = "Postman Collection Time (ms)")]
    pub collection_ms: f64,
    #[serde(rename = "Total Time (ms)")]
    pub total_ms: f64,
    #[serde(rename = "Average Time (ms)")]
    pub average_ms: f64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Status")]
    pub status: RecordStatus,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl TimingRecord {
    /// Builds a row for `model` with the two stage durations.
    pub fn for_model(
        model: &ModelDescriptor,
        naming_ms: f64,
        collection_ms: f64,
        status: RecordStatus,
    ) -> Self {
        let total = naming_ms + collection_ms;
        let average = if total > 0.0 { total / 2.0 } else { 0.0 };
        Self {
            tc_id: format!("TS_{}", model.suite_number()),
            model_lob: model.category().lob().to_string(),
            model_name: model.display_name().to_string(),
            edit_id: model.edit_identifier().to_string(),
            eob_code: model.eob_code().to_string(),
            naming_ms: round2(naming_ms),
            collection_ms: round2(collection_ms),
            total_ms: round2(total),
            average_ms: round2(average),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status,
        }
    }
}

/// Aggregate figures for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub records: usize,
    pub succeeded: usize,
    pub total_naming_ms: f64,
    pub total_collection_ms: f64,
    pub total_ms: f64,
    pub average_total_ms: f64,
    pub model_lobs: BTreeSet<String>,
    pub model_names: BTreeSet<String>,
}

/// Records collected during one run.
#[derive(Debug, Clone, Default)]
pub struct TimingReport {
    records: Vec<TimingRecord>,
}

impl TimingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TimingRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TimingRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            records: self.records.len(),
            ..ReportSummary::default()
        };
        for record in &self.records {
            if record.status == RecordStatus::Success {
                summary.succeeded += 1;
            }
            summary.total_naming_ms += record.naming_ms;
            summary.total_collection_ms += record.collection_ms;
            summary.total_ms += record.total_ms;
            summary.model_lobs.insert(record.model_lob.clone());
            summary.model_names.insert(record.model_name.clone());
        }
        if summary.records > 0 {
            summary.average_total_ms = round2(summary.total_ms / summary.records as f64);
        }
        summary
    }

    /// Writes `JSON_Renaming_Timing_Report_<label>_<YYYYmmdd_HHMMSS>.csv` into `dir`.
    pub fn write_csv(&self, dir: &Path, label: &str) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("JSON_Renaming_Timing_Report_{label}_{stamp}.csv"));
        self.write_csv_to(&path)?;
        Ok(path)
    }

    /// Writes the records to an explicit path.
    pub fn write_csv_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let csv_error = |source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        for record in &self.records {
            writer.serialize(record).map_err(csv_error)?;
        }
        writer.flush().map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(path = %path.display(), records = self.records.len(), "timing report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_model::{Category, ModelEntry};

    fn model() -> ModelDescriptor {
        ModelDescriptor::from_entry(ModelEntry {
            category: Category::GbdfMcr,
            suite_number: "47".to_string(),
            edit_id: "RULEEM000001".to_string(),
            eob_code: "v04".to_string(),
            display_name: Some("Covid".to_string()),
            folder_name: None,
            source_dir: PathBuf::from("in"),
            dest_dir: PathBuf::from("out"),
            collection_name: None,
            collection_file_name: None,
        })
        .unwrap()
    }

    #[test]
    fn test_record_totals() {
        let record = TimingRecord::for_model(&model(), 10.004, 20.0, RecordStatus::Success);
        assert_eq!(record.tc_id, "TS_47");
        assert_eq!(record.model_lob, "GBDF_MCR");
        assert_eq!(record.naming_ms, 10.0);
        assert_eq!(record.total_ms, 30.0);
        assert_eq!(record.average_ms, 15.0);
    }

    #[test]
    fn test_zero_total_has_zero_average() {
        let record = TimingRecord::for_model(&model(), 0.0, 0.0, RecordStatus::Failed);
        assert_eq!(record.average_ms, 0.0);
        assert_eq!(record.status.to_string(), "Failed");
    }

    #[test]
    fn test_summary() {
        let mut report = TimingReport::new();
        report.push(TimingRecord::for_model(&model(), 10.0, 10.0, RecordStatus::Success));
        report.push(TimingRecord::for_model(&model(), 20.0, 0.0, RecordStatus::Failed));
        let summary = report.summary();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.total_ms, 40.0);
        assert_eq!(summary.average_total_ms, 20.0);
        assert_eq!(summary.model_lobs.len(), 1);
    }
}
