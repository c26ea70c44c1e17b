//! Output generation for claims test fixtures: Postman collections,
//! collection checks, directory statistics and timing reports.

pub mod error;
pub mod inspect;
pub mod postman;
pub mod report;

pub use error::{OutputError, Result};
pub use inspect::{CollectionValidation, DirectoryStats, directory_stats, validate_collection};
pub use postman::{
    Collection, CollectionSettings, CollectionTarget, SCHEMA_V2_1, build_collection,
    emit_collection, headers_for, write_collection,
};
pub use report::{RecordStatus, ReportSummary, TimingRecord, TimingReport};
