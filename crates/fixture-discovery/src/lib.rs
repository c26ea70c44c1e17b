//! Discovery of claims test-fixture suites.
//!
//! Suites are folders whose names encode a suite number, a model family,
//! an edit identifier and an EOB code. This crate turns a directory of such
//! folders into [`fixture_model::ModelDescriptor`]s, falls back to a static
//! table when nothing is found, and loads the tool configuration.

pub mod config;
pub mod discovery;
pub mod error;
pub mod patterns;
pub mod resolve;

pub use config::{CONFIG_ENV_VAR, DiscoveryLayout, Stage, ToolConfig, resolve_config_path};
pub use discovery::{
    CategoryFilter, Discovery, DiscoveryOutcome, SkipReason, SkippedEntry, discover,
    discover_with_layout, lookup_by_suite_number,
};
pub use error::{DiscoveryError, Result};
pub use fixture_model::normalize_suite_number;
pub use resolve::{FallbackTable, ModelSource, ResolvedModels, resolve_models};
