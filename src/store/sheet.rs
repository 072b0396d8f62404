// src/store/sheet.rs

use crate::errors::{AppError, AppResult};
use crate::models::RawRow;
use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};
use std::fs;
use std::path::Path;

/// Read the first sheet of a workbook (`xlsx`, `xls`, `ods`) as display text.
pub fn read_workbook(path: &Path) -> AppResult<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::EmptyWorkbook(path.display().to_string()))?;

    let range = workbook.worksheet_range(&first)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(display_value).collect())
        .collect())
}

/// Read a CSV export. The delimiter (`;`, `,` or tab) is sniffed from the
/// first line; rows may have different lengths.
pub fn read_csv(path: &Path) -> AppResult<Vec<RawRow>> {
    let content = fs::read_to_string(path)?;
    let content = content.trim_start_matches('\u{FEFF}');

    let delimiter = sniff_delimiter(content.lines().next().unwrap_or(""));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

fn sniff_delimiter(line: &str) -> u8 {
    [b';', b'\t', b',']
        .into_iter()
        .max_by_key(|d| line.bytes().filter(|b| b == d).count())
        .filter(|d| line.as_bytes().contains(d))
        .unwrap_or(b',')
}

/// Render a cell the way a spreadsheet shows it: dates as `DD.MM.YYYY`,
/// times and durations as `H:MM`.
fn display_value(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => display_datetime(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

fn display_datetime(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();

    if dt.is_duration() || (0.0..1.0).contains(&serial) {
        let total = (serial * 24.0 * 60.0).round() as i64;
        return format!("{}:{:02}", total / 60, total % 60);
    }

    match dt.as_datetime() {
        Some(ndt) if serial.fract() == 0.0 => ndt.format("%d.%m.%Y").to_string(),
        Some(ndt) => ndt.format("%d.%m.%Y %H:%M").to_string(),
        None => serial.to_string(),
    }
}
