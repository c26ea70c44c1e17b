//! Renaming and payload mutation for claims test-fixture files.

pub mod error;
pub mod mutate;
pub mod name;
pub mod rename;

pub use error::{Result, TransformError};
pub use mutate::{
    CHECK_NUMBER_FIELD, CLAIM_ID_FIELD, MutationReport, PayloadMutation, has_envelope,
    mutate_file, random_check_number,
};
pub use name::{NameShape, RenamedCase, TestCaseName};
pub use rename::{
    FailedRename, RenameEntry, RenameOptions, RenameOutcome, RenamePlan, RenameSkip,
    RenamedFile, apply_renames, plan_renames, plan_renames_in,
};
