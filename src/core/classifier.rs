//! Raw row classification for Gate / SoftGate exports.
//!
//! A row of the raw sheet is one of:
//! - a section header introducing an employee and their badge key,
//! - noise (column titles, page footers, totals banners, blank lines),
//! - a candidate event row, whose fields are pulled out by a [`RowExtractor`].

use crate::models::event_kind::EventKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Marker cell of a section header row.
pub const BADGE_KEY_MARKER: &str = "Номер ключа:";

/// First-cell literals of column-title and report-title rows.
const TITLE_LITERALS: [&str; 2] = ["Устройство входа", "Суммарный отчет рабочего времени"];

/// Cells that mark totals banners and page footers anywhere in a row.
const FOOTER_LITERALS: [&str; 2] = ["Всего времени:", "Страница"];

/// Default column index below which a lone device is read as an entry turnstile.
pub const DEFAULT_ENTRY_DEVICE_MAX_COLUMN: usize = 5;

static DATE_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid date regex"));
static TIME_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid time regex"));

pub fn is_date_cell(s: &str) -> bool {
    DATE_CELL.is_match(s)
}

pub fn is_time_cell(s: &str) -> bool {
    TIME_CELL.is_match(s)
}

/// What a single raw row turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    Header { employee: String, badge_key: String },
    Noise,
    Candidate,
}

/// Event fields found in one row, before minutes are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEvent {
    pub kind: EventKind,
    pub date: String,
    pub entry_time: String,
    pub exit_time: String,
    pub entry_device: String,
    pub exit_device: String,
    /// Raw `H:MM` duration cell, only ever set on complete pairs.
    pub duration: Option<String>,
}

impl RowEvent {
    /// Date is `DD.MM.YYYY` and every present time is `H:MM`.
    pub fn has_canonical_cells(&self) -> bool {
        is_date_cell(&self.date)
            && [&self.entry_time, &self.exit_time]
                .iter()
                .all(|t| t.is_empty() || is_time_cell(t))
    }

    fn full(
        date: &str,
        entry_time: &str,
        exit_time: &str,
        entry_device: &str,
        exit_device: &str,
        duration: Option<&str>,
    ) -> Self {
        Self {
            kind: EventKind::Full,
            date: date.to_string(),
            entry_time: entry_time.to_string(),
            exit_time: exit_time.to_string(),
            entry_device: entry_device.to_string(),
            exit_device: exit_device.to_string(),
            duration: duration.map(str::to_string),
        }
    }

    fn entry(date: &str, time: &str, device: &str) -> Self {
        Self {
            kind: EventKind::EntryOnly,
            date: date.to_string(),
            entry_time: time.to_string(),
            exit_time: String::new(),
            entry_device: device.to_string(),
            exit_device: String::new(),
            duration: None,
        }
    }

    fn exit(date: &str, time: &str, device: &str) -> Self {
        Self {
            kind: EventKind::ExitOnly,
            date: date.to_string(),
            entry_time: String::new(),
            exit_time: time.to_string(),
            entry_device: String::new(),
            exit_device: device.to_string(),
            duration: None,
        }
    }
}

/// Trim every cell of a row.
pub fn trim_row<S: AsRef<str>>(row: &[S]) -> Vec<String> {
    row.iter().map(|c| c.as_ref().trim().to_string()).collect()
}

/// Classify a trimmed row.
pub fn classify(row: &[String]) -> RowClass {
    if let Some(pos) = row.iter().position(|c| c == BADGE_KEY_MARKER) {
        let employee = row.first().cloned().unwrap_or_default();
        let badge_key = [pos + 2, pos + 1]
            .iter()
            .filter_map(|i| row.get(*i))
            .find(|c| !c.is_empty())
            .cloned()
            .unwrap_or_default();

        return RowClass::Header {
            employee,
            badge_key,
        };
    }

    if is_noise(row) {
        return RowClass::Noise;
    }

    RowClass::Candidate
}

fn is_noise(row: &[String]) -> bool {
    if let Some(first) = row.first()
        && TITLE_LITERALS.contains(&first.as_str())
    {
        return true;
    }

    if row.iter().any(|c| FOOTER_LITERALS.contains(&c.as_str())) {
        return true;
    }

    row.iter().all(|c| c.is_empty())
}

/// Pulls event fields out of a candidate row.
pub trait RowExtractor {
    fn extract(&self, row: &[String]) -> Option<RowEvent>;
}

/// Legacy layout: entry device/date/time in columns 0–2, exit device/date/time
/// in 3–5, duration in 6.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedColumns;

impl RowExtractor for FixedColumns {
    fn extract(&self, row: &[String]) -> Option<RowEvent> {
        let col = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let (entry_device, entry_date, entry_time) = (col(0), col(1), col(2));
        let (exit_device, exit_date, exit_time) = (col(3), col(4), col(5));
        let duration = col(6);

        let has_entry = !entry_device.is_empty() && !entry_date.is_empty() && !entry_time.is_empty();
        let has_exit = !exit_device.is_empty() && !exit_date.is_empty() && !exit_time.is_empty();

        if has_entry && has_exit {
            Some(RowEvent::full(
                entry_date,
                entry_time,
                exit_time,
                entry_device,
                exit_device,
                Some(duration),
            ))
        } else if has_entry && exit_device.is_empty() {
            Some(RowEvent::entry(entry_date, entry_time, entry_device))
        } else if entry_device.is_empty() && has_exit {
            Some(RowEvent::exit(exit_date, exit_time, exit_device))
        } else {
            None
        }
    }
}

/// Layout-agnostic scan: finds date-like, time-like and device-like cells
/// wherever they sit in the row.
#[derive(Debug, Clone, Copy)]
pub struct PatternScan {
    /// A lone device left of this column marks an entry, otherwise an exit.
    pub entry_device_max_column: usize,
}

impl Default for PatternScan {
    fn default() -> Self {
        Self {
            entry_device_max_column: DEFAULT_ENTRY_DEVICE_MAX_COLUMN,
        }
    }
}

struct Token<'a> {
    idx: usize,
    val: &'a str,
}

impl RowExtractor for PatternScan {
    fn extract(&self, row: &[String]) -> Option<RowEvent> {
        let mut dates: Vec<Token> = Vec::new();
        let mut times: Vec<Token> = Vec::new();
        let mut devices: Vec<Token> = Vec::new();

        for (idx, val) in row.iter().enumerate() {
            let val = val.as_str();
            if is_date_cell(val) {
                dates.push(Token { idx, val });
            } else if is_time_cell(val) {
                times.push(Token { idx, val });
            } else if val.chars().count() > 2 {
                devices.push(Token { idx, val });
            }
        }

        if dates.len() >= 2 && times.len() >= 2 {
            let (entry_date, exit_date) = (&dates[0], &dates[1]);
            let (entry_time, exit_time) = (&times[0], &times[1]);

            let mut entry_device = "";
            let mut exit_device = "";
            for d in &devices {
                if d.idx < entry_date.idx {
                    entry_device = d.val;
                } else if d.idx > entry_time.idx && d.idx < exit_date.idx {
                    exit_device = d.val;
                }
            }

            let duration = times
                .iter()
                .rev()
                .find(|t| t.idx > exit_time.idx)
                .map(|t| t.val)
                .or_else(|| row.last().map(String::as_str).filter(|v| is_time_cell(v)));

            return Some(RowEvent::full(
                entry_date.val,
                entry_time.val,
                exit_time.val,
                entry_device,
                exit_device,
                duration,
            ));
        }

        if dates.len() == 1 && times.len() == 1 {
            let device = devices.first();
            let is_entry = device.is_some_and(|d| d.idx < self.entry_device_max_column);
            let device = device.map(|d| d.val).unwrap_or("");

            return Some(if is_entry {
                RowEvent::entry(dates[0].val, times[0].val, device)
            } else {
                RowEvent::exit(dates[0].val, times[0].val, device)
            });
        }

        None
    }
}

/// Which extractor(s) to apply to candidate rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Pattern scan first, then fixed columns when they hold a canonical
    /// `DD.MM.YYYY` date and `H:MM` times.
    #[default]
    Auto,
    Pattern,
    Fixed,
}

/// Extractor selected by an [`ExtractionMode`].
#[derive(Debug, Clone, Copy)]
pub struct ModeExtractor {
    pub mode: ExtractionMode,
    pub scan: PatternScan,
}

impl ModeExtractor {
    pub fn new(mode: ExtractionMode, entry_device_max_column: usize) -> Self {
        Self {
            mode,
            scan: PatternScan {
                entry_device_max_column,
            },
        }
    }
}

impl Default for ModeExtractor {
    fn default() -> Self {
        Self::new(ExtractionMode::Auto, DEFAULT_ENTRY_DEVICE_MAX_COLUMN)
    }
}

impl RowExtractor for ModeExtractor {
    fn extract(&self, row: &[String]) -> Option<RowEvent> {
        match self.mode {
            ExtractionMode::Pattern => self.scan.extract(row),
            ExtractionMode::Fixed => FixedColumns.extract(row),
            ExtractionMode::Auto => self.scan.extract(row).or_else(|| {
                FixedColumns
                    .extract(row)
                    .filter(RowEvent::has_canonical_cells)
            }),
        }
    }
}
