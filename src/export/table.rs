// src/export/table.rs

use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::RawRow;
use crate::store::DatasetStore;
use crate::ui::messages::{info, warning};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct TableDocument<'a> {
    dataset: &'a str,
    columns: &'a [String],
    rows: &'a [RawRow],
}

/// Write one dataset to `path`. The first stored row is the header.
pub fn export_table(
    datasets: &dyn DatasetStore,
    dataset: &str,
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<usize> {
    let rows = datasets.read_table(dataset)?;
    if rows.is_empty() {
        warning(format!("Dataset '{dataset}' is empty"));
    }

    ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => export_csv(&rows, path)?,
        ExportFormat::Json => export_json(dataset, &rows, path)?,
    }

    Ok(rows.len().saturating_sub(1))
}

fn export_json(dataset: &str, rows: &[RawRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let (columns, data): (&[String], &[RawRow]) = match rows.split_first() {
        Some((header, data)) => (header.as_slice(), data),
        None => (&[], &[]),
    };

    let doc = TableDocument {
        dataset,
        columns,
        rows: data,
    };
    let json_data = serde_json::to_string_pretty(&doc)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

fn export_csv(rows: &[RawRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(AppError::from)?;

    notify_export_success("CSV", path);
    Ok(())
}
