use std::path::{Path, PathBuf};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fixture_discovery::ModelSource;
use fixture_output::{CollectionValidation, DirectoryStats, RecordStatus};

use fixture_cli::types::{CategoryListing, ListResult, ModelResult, ProcessResult};

pub fn print_listings(result: &ListResult) {
    for listing in &result.listings {
        print_listing(listing);
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for (category, error) in &result.errors {
            eprintln!("- {category}: {error}");
        }
    }
}

fn print_listing(listing: &CategoryListing) {
    println!(
        "{} ({}, {} models)",
        listing.category,
        source_label(listing.source),
        listing.models.len()
    );
    if listing.models.is_empty() {
        println!("  no models");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Suite"),
        header_cell("Model"),
        header_cell("Edit ID"),
        header_cell("EOB"),
        header_cell("Source"),
        header_cell("Collection"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for model in &listing.models {
        table.add_row(vec![
            Cell::new(model.suite_number()).add_attribute(Attribute::Bold),
            Cell::new(model.display_name()),
            Cell::new(model.edit_identifier()),
            Cell::new(model.eob_code()),
            presence_cell(model.source_path().is_dir()),
            dim_cell(model.collection_name()),
        ]);
    }
    println!("{table}");
    for name in &listing.malformed {
        println!("  malformed suite folder: {name}");
    }
}

pub fn print_process_summary(result: &ProcessResult) {
    println!("Category: {}", result.category);
    if let Some(source) = result.source {
        println!("Models: {}", source_label(source));
    }
    if result.dry_run {
        println!("Dry run: no files were changed");
    }
    if let Some(path) = &result.report {
        println!("Timing report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Suite"),
        header_cell("Model"),
        header_cell("Edit ID"),
        header_cell("EOB"),
        header_cell("Renamed"),
        header_cell("Skipped"),
        header_cell("Collection"),
        header_cell("Time (ms)"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    align_column(&mut table, 7, CellAlignment::Right);

    let mut total_skipped = 0usize;
    let mut total_ms = 0.0f64;
    for model in &result.models {
        total_skipped += model.skipped;
        total_ms += model.naming_ms + model.collection_ms;
        table.add_row(model_row(model));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} models", result.models.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.total_renamed()).add_attribute(Attribute::Bold),
        count_cell(total_skipped, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{total_ms:.2}")).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    for model in &result.models {
        if let Some(path) = &model.collection {
            println!("Collection TS_{}: {}", model.model.suite_number(), path.display());
        }
    }
    if !result.missing_suites.is_empty() {
        eprintln!("Suites not found: {}", result.missing_suites.join(", "));
    }
    let failures: Vec<&ModelResult> = result.models.iter().filter(|m| m.has_errors()).collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for model in failures {
            for error in &model.errors {
                eprintln!("- TS_{}: {error}", model.model.suite_number());
            }
        }
    }
}

fn model_row(model: &ModelResult) -> Vec<Cell> {
    vec![
        Cell::new(model.model.suite_number()).add_attribute(Attribute::Bold),
        Cell::new(model.model.display_name()),
        Cell::new(model.model.edit_identifier()),
        Cell::new(model.model.eob_code()),
        Cell::new(model.renamed),
        count_cell(model.skipped, Color::Yellow),
        collection_cell(model.collection.as_ref()),
        Cell::new(format!("{:.2}", model.naming_ms + model.collection_ms)),
        status_cell(model.status()),
    ]
}

pub fn print_stats(stats: &DirectoryStats) {
    println!("Directory: {}", stats.directory.display());
    println!(
        "JSON files: {} ({} renamed)",
        stats.total_files,
        stats.renamed_files()
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Files")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (code, count) in &stats.by_outcome {
        table.add_row(vec![Cell::new(code).add_attribute(Attribute::Bold), Cell::new(count)]);
    }
    println!("{table}");
    if !stats.edit_ids.is_empty() {
        let edits: Vec<&str> = stats.edit_ids.iter().map(String::as_str).collect();
        println!("Edit IDs: {}", edits.join(", "));
    }
    if !stats.eob_codes.is_empty() {
        let eobs: Vec<&str> = stats.eob_codes.iter().map(String::as_str).collect();
        println!("EOB codes: {}", eobs.join(", "));
    }
}

pub fn print_validation(path: &Path, result: &CollectionValidation) {
    let verdict = if result.valid { "valid" } else { "INVALID" };
    println!("{}: {verdict} ({} requests)", path.display(), result.total_requests);
    for error in &result.errors {
        eprintln!("error: {error}");
    }
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }
}

fn source_label(source: ModelSource) -> String {
    match source {
        ModelSource::Discovered => "discovered".to_string(),
        ModelSource::Fallback { reason } => format!("fallback table, {}", reason.describe()),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: RecordStatus) -> Cell {
    match status {
        RecordStatus::Success => Cell::new("OK").fg(Color::Green),
        RecordStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn collection_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(_) => Cell::new("✓").fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn presence_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("missing").fg(Color::Yellow)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
