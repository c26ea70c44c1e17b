use std::path::PathBuf;

use fixture_model::{Category, ModelDescriptor, ModelEntry, ModelError};

fn legacy_entry() -> ModelEntry {
    ModelEntry {
        category: Category::WgsCsbd,
        suite_number: "01".to_string(),
        edit_id: "rvn001".to_string(),
        eob_code: "00W5".to_string(),
        display_name: Some("REVENUE".to_string()),
        folder_name: Some("TS_01_REVENUE_WGS_CSBD_rvn001_00W5_payloads_sur".to_string()),
        source_dir: PathBuf::from("TS_01_REVENUE_WGS_CSBD_rvn001_00W5_payloads_sur/regression"),
        dest_dir: PathBuf::from(
            "renaming_jsons/TS_01_REVENUE_WGS_CSBD_rvn001_00W5_payloads_dis/regression",
        ),
        collection_name: Some("ts_1_collection".to_string()),
        collection_file_name: None,
    }
}

#[test]
fn entry_round_trips_through_json() {
    let entry = legacy_entry();
    let json = serde_json::to_string(&entry).unwrap();
    assert!(json.contains("\"category\":\"wgs_csbd\""));
    let back: ModelEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn explicit_collection_name_is_kept() {
    let model = ModelDescriptor::from_entry(legacy_entry()).unwrap();
    assert_eq!(model.collection_name(), "ts_1_collection");
    assert_eq!(
        model.collection_file_name(),
        "revenue_wgs_csbd_rvn001_00w5.json"
    );
}

#[test]
fn to_entry_preserves_derived_names() {
    let model = ModelDescriptor::from_entry(legacy_entry()).unwrap();
    let rebuilt = ModelDescriptor::from_entry(model.to_entry()).unwrap();
    assert_eq!(rebuilt, model);
}

#[test]
fn missing_source_is_reported_by_validate() {
    let model = ModelDescriptor::from_entry(legacy_entry()).unwrap();
    match model.validate() {
        Err(ModelError::SourceMissing { path }) => {
            assert_eq!(path, model.source_path());
        }
        other => panic!("expected SourceMissing, got {other:?}"),
    }
}

#[test]
fn invalid_suite_number_is_rejected() {
    let mut entry = legacy_entry();
    entry.suite_number = "1a".to_string();
    assert!(matches!(
        ModelDescriptor::from_entry(entry),
        Err(ModelError::InvalidSuiteNumber { .. })
    ));
}

#[test]
fn default_folder_name_uses_category_prefix() {
    let entry = ModelEntry {
        category: Category::GbdfMcr,
        suite_number: "3".to_string(),
        edit_id: "RULEM0001".to_string(),
        eob_code: "v04".to_string(),
        display_name: None,
        folder_name: None,
        source_dir: PathBuf::from("in"),
        dest_dir: PathBuf::from("out"),
        collection_name: None,
        collection_file_name: None,
    };
    let model = ModelDescriptor::from_entry(entry).unwrap();
    assert_eq!(model.display_name(), "GBDF MCR");
    assert_eq!(model.folder_name(), "GBDTS_03_GBDF_MCR_gbdf_mcr_RULEM0001_v04");
    assert_eq!(
        model.collection_file_name(),
        "gbdf_mcr_gbdf_mcr_rulem0001_v04.json"
    );
}
