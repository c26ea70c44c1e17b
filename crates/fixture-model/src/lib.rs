//! Domain types for claims test-fixture suites.
//!
//! This crate has no I/O beyond the existence check in
//! [`ModelDescriptor::validate`]. Discovery, renaming and output live in the
//! sibling crates.

pub mod category;
pub mod descriptor;
pub mod error;
pub mod outcome;
pub mod suite;

pub use category::{Category, PayloadFamily};
pub use descriptor::{
    ModelDescriptor, ModelEntry, collection_file_name, duplicate_suite_numbers,
    strip_source_marker,
};
pub use error::{ModelError, Result};
pub use outcome::{OutcomeCode, SuffixKind};
pub use suite::{MAX_SUITE_DIGITS, SuiteNumber, is_valid_suite_number, normalize_suite_number};
