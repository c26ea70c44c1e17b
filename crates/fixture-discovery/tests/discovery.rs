//! Tests for suite folder discovery.

use std::fs;
use std::path::Path;

use fixture_discovery::{
    CategoryFilter, DiscoveryError, DiscoveryLayout, DiscoveryOutcome, FallbackTable, SkipReason,
    Stage, discover, discover_with_layout, lookup_by_suite_number, normalize_suite_number,
};
use fixture_model::Category;
use tempfile::TempDir;

fn mkdir(root: &Path, name: &str) {
    fs::create_dir_all(root.join(name)).expect("create folder");
}

#[test]
fn nonexistent_root_yields_empty_result() {
    let dir = TempDir::new().unwrap();
    let discovery = discover(&dir.path().join("missing"), CategoryFilter::All).unwrap();
    assert!(discovery.models.is_empty());
    assert!(discovery.skipped.is_empty());
    assert_eq!(discovery.outcome(), DiscoveryOutcome::RootMissing);
}

#[test]
fn single_category_a_folder_is_described() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "CSBDTS_7_Revenue_Code_WGS_CSBD_RULEX00001_00W28_sur");

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    assert_eq!(discovery.models.len(), 1);

    let model = &discovery.models[0];
    assert_eq!(model.suite_number(), "07");
    assert_eq!(model.raw_suite_number(), "7");
    assert_eq!(model.category(), Category::WgsCsbd);
    assert_eq!(model.edit_identifier(), "RULEX00001");
    assert_eq!(model.eob_code(), "00W28");
    assert_eq!(model.display_name(), "Revenue Code");
    assert_eq!(
        model.source_path(),
        dir.path()
            .join("CSBDTS_7_Revenue_Code_WGS_CSBD_RULEX00001_00W28_sur")
            .join("payloads")
            .join("regression")
    );
    assert_eq!(
        model.dest_path(),
        Path::new("renaming_jsons/CSBDTS/CSBDTS_7_Revenue_Code_WGS_CSBD_RULEX00001_00W28_dis/payloads/regression")
    );
    assert_eq!(
        model.collection_file_name(),
        "revenue_code_wgs_csbd_rulex00001_00w28.json"
    );
}

#[test]
fn unmatched_folder_is_skipped_not_failed() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "CSBDTS_7_Revenue_WGS_CSBD_RULEX00001_00W28_sur");
    mkdir(dir.path(), "scratch");
    fs::write(dir.path().join("README.txt"), "notes").unwrap();

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    assert_eq!(discovery.models.len(), 1);
    assert_eq!(discovery.skipped.len(), 1);
    assert_eq!(discovery.skipped[0].name, "scratch");
    assert_eq!(discovery.skipped[0].reason, SkipReason::Unmatched);
    assert_eq!(discovery.outcome(), DiscoveryOutcome::Matched { count: 1 });
}

#[test]
fn only_unmatched_folders_report_no_matches() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "archive");
    mkdir(dir.path(), "tmp");

    let discovery = discover(dir.path(), CategoryFilter::All).unwrap();
    assert_eq!(discovery.outcome(), DiscoveryOutcome::NoMatches { skipped: 2 });
}

#[test]
fn misspelled_payloads_token_still_matches() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "TS_03_REVENUE_WGS_CSBD_rvn003_00W7_ayloads_sur");

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    assert_eq!(discovery.models.len(), 1);

    let model = &discovery.models[0];
    assert_eq!(model.suite_number(), "03");
    assert_eq!(model.edit_identifier(), "rvn003");
    assert_eq!(model.eob_code(), "00W7");
    assert_eq!(
        model.source_path(),
        dir.path()
            .join("TS_03_REVENUE_WGS_CSBD_rvn003_00W7_ayloads_sur")
            .join("regression")
    );
    assert_eq!(
        model.dest_path(),
        Path::new("renaming_jsons/TS_03_REVENUE_WGS_CSBD_rvn003_00W7_payloads_dis/regression")
    );
    assert_eq!(model.collection_name(), "ts_3_collection");
    assert_eq!(
        model.collection_file_name(),
        "revenue_wgs_csbd_rvn003_00w7.json"
    );
}

#[test]
fn lookup_accepts_padded_and_unpadded_queries() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "CSBDTS_7_Revenue_WGS_CSBD_RULEX00001_00W28_sur");
    mkdir(dir.path(), "CSBDTS_12_Other_WGS_CSBD_RULEX00002_00W29_sur");

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    let by_short = lookup_by_suite_number(&discovery.models, "7").expect("found by 7");
    let by_padded = lookup_by_suite_number(&discovery.models, "07").expect("found by 07");
    assert_eq!(by_short, by_padded);
    assert_eq!(by_short.edit_identifier(), "RULEX00001");
    assert!(lookup_by_suite_number(&discovery.models, "99").is_none());
    assert!(lookup_by_suite_number(&discovery.models, "seven").is_none());
}

#[test]
fn malformed_suite_numbers_are_reported() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "CSBDTS_x7_Revenue_WGS_CSBD_RULEX00001_00W28_sur");
    mkdir(dir.path(), "CSBDTS_1000_Revenue_WGS_CSBD_RULEX00001_00W28_sur");
    mkdir(dir.path(), "CSBDTS__Revenue_WGS_CSBD_RULEX00001_00W28_sur");

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    assert!(discovery.models.is_empty());
    assert_eq!(discovery.malformed().count(), 3);
    assert_eq!(discovery.outcome(), DiscoveryOutcome::NoMatches { skipped: 3 });

    let empty_id = discovery
        .skipped
        .iter()
        .find(|entry| entry.name == "CSBDTS__Revenue_WGS_CSBD_RULEX00001_00W28_sur")
        .expect("empty id folder reported");
    assert_eq!(
        empty_id.reason,
        SkipReason::InvalidSuiteNumber {
            value: String::new()
        }
    );
}

#[test]
fn legacy_folder_shares_fallback_collection_name() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "TS_01_REVENUE_WGS_CSBD_rvn001_00W5_payloads_sur");

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    assert_eq!(discovery.models.len(), 1);
    let discovered = &discovery.models[0];

    let table = FallbackTable::builtin().unwrap();
    let fallback = table.for_category(Category::WgsCsbd);
    let listed = lookup_by_suite_number(&fallback, "01").expect("suite 01 in fallback table");
    assert_eq!(discovered.collection_name(), "ts_1_collection");
    assert_eq!(discovered.collection_name(), listed.collection_name());
}

#[test]
fn file_in_place_of_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("WGS_CSBD");
    fs::write(&root, "not a folder").unwrap();

    let err = discover(&root, CategoryFilter::Only(Category::WgsCsbd)).unwrap_err();
    assert!(matches!(err, DiscoveryError::ReadDir { ref path, .. } if path == &root));
}

#[test]
fn duplicates_are_kept() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "CSBDTS_7_Revenue_WGS_CSBD_RULEX00001_00W28_sur");
    mkdir(dir.path(), "TS_07_Revenue_WGS_CSBD_RULEX00002_00W29_sur");

    let discovery = discover(dir.path(), CategoryFilter::Only(Category::WgsCsbd)).unwrap();
    assert_eq!(discovery.models.len(), 2);
    assert!(discovery.models.iter().all(|m| m.suite_number() == "07"));
}

#[test]
fn gbdf_root_is_split_by_variant() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "GBDTS_1_Covid_gbdf_mcr_RULEM0001_v04_sur");
    mkdir(dir.path(), "TS_2_Covid_gbdf_grs_RULEG0001_v05_sur");

    let mcr = discover(dir.path(), CategoryFilter::Only(Category::GbdfMcr)).unwrap();
    assert_eq!(mcr.models.len(), 1);
    assert_eq!(mcr.models[0].suite_number(), "01");

    let all = discover(dir.path(), CategoryFilter::All).unwrap();
    let categories: Vec<Category> = all.models.iter().map(|m| m.category()).collect();
    assert!(categories.contains(&Category::GbdfMcr));
    assert!(categories.contains(&Category::GbdfGrs));
}

#[test]
fn layout_controls_destination_and_stage() {
    let dir = TempDir::new().unwrap();
    mkdir(dir.path(), "NYKTS_5_Kernal_WGS_NYK_RULEN0001_00W1_sur");

    let layout = DiscoveryLayout::new("out").with_stage(Stage::Smoke);
    let discovery = discover_with_layout(
        dir.path(),
        CategoryFilter::Only(Category::WgsKernal),
        &layout,
    )
    .unwrap();
    let model = &discovery.models[0];
    assert!(model.source_path().ends_with("payloads/smoke"));
    assert_eq!(
        model.dest_path(),
        Path::new("out/NYKTS/NYKTS_5_Kernal_WGS_NYK_RULEN0001_00W1_dis/payloads/smoke")
    );
}

#[test]
fn normalization_is_reexported() {
    assert_eq!(normalize_suite_number("1"), "01");
    assert_eq!(normalize_suite_number("07"), "07");
    assert_eq!(normalize_suite_number("122"), "122");
}
