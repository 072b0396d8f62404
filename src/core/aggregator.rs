//! Event table → employee × day timesheet.

use crate::core::classifier::is_date_cell;
use crate::core::codec::{DateValue, date_sort_key, normalize_date};
use crate::errors::{AppError, AppResult};
use crate::models::RawRow;
use crate::models::timesheet::Timesheet;
use std::collections::{BTreeMap, HashMap};

/// Event table column as the aggregator sees it: accepted header names plus
/// the position used when the header is missing or the named cell is empty.
struct Field {
    names: &'static [&'static str],
    position: usize,
}

const NAME: Field = Field {
    names: &["employee_name", "фио"],
    position: 0,
};
const DATE: Field = Field {
    names: &["date", "дата"],
    position: 2,
};
const MINUTES: Field = Field {
    names: &["minutes", "минут"],
    position: 5,
};

/// Header cell → column index. Keys are lower-cased and NBSP-normalized.
fn index_map(header: &[String]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let key = h.replace('\u{00A0}', " ").trim().to_lowercase();
            (!key.is_empty()).then_some((key, i))
        })
        .collect()
}

struct EventTable {
    index: HashMap<String, usize>,
}

impl EventTable {
    fn cell<'r>(&self, row: &'r [String], field: &Field) -> &'r str {
        let named = field
            .names
            .iter()
            .find_map(|n| self.index.get(*n))
            .and_then(|i| row.get(*i))
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty());

        named
            .or_else(|| row.get(field.position).map(|s| s.as_str()))
            .unwrap_or("")
    }
}

fn parse_minutes(s: &str) -> i64 {
    let s = s.trim();
    s.parse::<i64>()
        .or_else(|_| s.parse::<f64>().map(|f| f.round() as i64))
        .unwrap_or(0)
        .max(0)
}

/// Earliest and latest valid dates of the event table, in matrix order.
///
/// `None` when the table holds no row with a usable date.
pub fn date_range(table: &[RawRow]) -> Option<(String, String)> {
    let (header, rows) = table.split_first()?;
    let events = EventTable {
        index: index_map(header),
    };

    let mut dates: Vec<String> = Vec::new();
    for row in rows {
        if events.cell(row, &NAME).trim().is_empty() {
            continue;
        }
        let date = normalize_date(DateValue::Text(events.cell(row, &DATE)));
        if is_date_cell(&date) && !dates.contains(&date) {
            dates.push(date);
        }
    }
    dates.sort_by_key(|d| date_sort_key(d));

    Some((dates.first()?.clone(), dates.last()?.clone()))
}

/// Build the timesheet from the persisted event table (header row first).
///
/// Fails when the table has no data rows.
pub fn build_timesheet(table: &[RawRow], dataset: &str) -> AppResult<Timesheet> {
    let Some((header, rows)) = table.split_first() else {
        return Err(AppError::NoEvents(dataset.to_string()));
    };
    if rows.is_empty() {
        return Err(AppError::NoEvents(dataset.to_string()));
    }

    let events = EventTable {
        index: index_map(header),
    };

    let mut cells: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    let mut dates: Vec<String> = Vec::new();

    for row in rows {
        let name = events.cell(row, &NAME).trim();
        let date = normalize_date(DateValue::Text(events.cell(row, &DATE)));
        let minutes = parse_minutes(events.cell(row, &MINUTES));

        if name.is_empty() || date.is_empty() || !is_date_cell(&date) {
            continue;
        }

        if !dates.contains(&date) {
            dates.push(date.clone());
        }

        *cells
            .entry(name.to_string())
            .or_default()
            .entry(date)
            .or_insert(0) += minutes;
    }

    // Stable sort: dates that fail to parse share key 0 and keep first-seen order.
    dates.sort_by_key(|d| date_sort_key(d));

    Ok(Timesheet {
        employees: cells.keys().cloned().collect(),
        dates,
        cells,
    })
}
