//! CLI argument definitions for the claims fixture tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fixture_model::Category;

#[derive(Parser)]
#[command(
    name = "claims-fixtures",
    version,
    about = "Claims test fixtures - rename test cases and build Postman collections",
    long_about = "Discover claims test suites, rename their test-case JSON files to the\n\
                  TC#<id>#<edit>#<eob>#<LR|NR|EX> convention, refresh payload identifiers\n\
                  and emit one Postman v2.1 collection per suite."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: $CLAIMS_FIXTURES_CONFIG or ./claims-fixtures.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the suites discovered (or the fallback models) per category.
    List(ListArgs),

    /// Rename, mutate and collect the selected suites of one category.
    Process(ProcessArgs),

    /// Process a hand-specified model outside the discovered suites.
    Custom(CustomArgs),

    /// Build a Postman collection for an arbitrary directory.
    Collection(CollectionArgs),

    /// Show outcome statistics for a directory of renamed test cases.
    Stats(StatsArgs),

    /// Check that a Postman collection file is well formed.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Category to list (repeatable; default: all categories).
    #[arg(long = "category", value_enum)]
    pub categories: Vec<CategoryArg>,

    /// Root containing the per-category source folders (overrides config).
    #[arg(long = "source-root", value_name = "DIR")]
    pub source_root: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Category whose suites are processed.
    #[arg(long = "category", value_enum)]
    pub category: CategoryArg,

    #[command(flatten)]
    pub selection: SuiteSelectionArgs,

    /// Root containing the per-category source folders (overrides config).
    #[arg(long = "source-root", value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Do not write the timing report.
    #[arg(long = "no-report")]
    pub no_report: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SuiteSelectionArgs {
    /// Suite number to process (repeatable; `7` and `07` are the same suite).
    #[arg(long = "suite", value_name = "N")]
    pub suites: Vec<String>,

    /// Process every suite of the category.
    #[arg(long = "all")]
    pub all: bool,
}

/// Flags shared by every command that renames files.
#[derive(Args, Clone, Copy)]
pub struct RunArgs {
    /// Skip Postman collection generation.
    #[arg(long = "no-collection")]
    pub no_collection: bool,

    /// Plan and log renames without touching any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Copy test cases instead of moving them.
    #[arg(long = "keep-source")]
    pub keep_source: bool,
}

#[derive(Parser)]
pub struct CustomArgs {
    /// Category that decides payload mutation and collection headers.
    #[arg(long = "category", value_enum)]
    pub category: CategoryArg,

    /// Edit identifier written into renamed files.
    #[arg(long = "edit-id", value_name = "EDIT")]
    pub edit_id: String,

    /// EOB code written into renamed files.
    #[arg(long = "eob-code", value_name = "EOB")]
    pub eob_code: String,

    /// Directory holding the test cases to rename.
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Destination directory (default: <dest_root>/<suite prefix>/custom_<edit>_<eob>).
    #[arg(long = "dest-dir", value_name = "DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Collection name (default: derived from edit and EOB).
    #[arg(long = "collection-name", value_name = "NAME")]
    pub collection_name: Option<String>,

    /// Suite number recorded in the timing report.
    #[arg(long = "suite", value_name = "N", default_value = "00")]
    pub suite: String,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser)]
pub struct CollectionArgs {
    /// Directory of renamed test cases.
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: PathBuf,

    /// Collection name.
    #[arg(long = "name", value_name = "NAME")]
    pub name: String,

    /// Category whose request headers are used.
    #[arg(long = "category", value_enum, default_value = "wgs-csbd")]
    pub category: CategoryArg,

    /// Output root for the collection (overrides config).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Directory of renamed test cases.
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the collection file.
    #[arg(value_name = "COLLECTION")]
    pub collection: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    WgsCsbd,
    GbdfMcr,
    GbdfGrs,
    WgsKernal,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::WgsCsbd => Category::WgsCsbd,
            CategoryArg::GbdfMcr => Category::GbdfMcr,
            CategoryArg::GbdfGrs => Category::GbdfGrs,
            CategoryArg::WgsKernal => Category::WgsKernal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_process_requires_selection() {
        let parsed = Cli::try_parse_from(["claims-fixtures", "process", "--category", "gbdf-mcr"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_process_suites() {
        let cli = Cli::try_parse_from([
            "claims-fixtures",
            "process",
            "--category",
            "wgs-csbd",
            "--suite",
            "7",
            "--suite",
            "10",
            "--dry-run",
        ])
        .unwrap();
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(Category::from(args.category), Category::WgsCsbd);
        assert_eq!(args.selection.suites, vec!["7", "10"]);
        assert!(!args.selection.all);
        assert!(args.run.dry_run);
    }

    #[test]
    fn test_suite_and_all_conflict() {
        let parsed = Cli::try_parse_from([
            "claims-fixtures",
            "process",
            "--category",
            "wgs-csbd",
            "--suite",
            "7",
            "--all",
        ]);
        assert!(parsed.is_err());
    }
}
