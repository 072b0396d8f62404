use super::RawRow;
use super::event_kind::EventKind;
use crate::core::codec::format_minutes;
use serde::Serialize;

/// Column names of the persisted event table, in order.
pub const EVENT_COLUMNS: [&str; 8] = [
    "employee_name",
    "badge_key",
    "date",
    "entry_time",
    "exit_time",
    "minutes",
    "hours",
    "kind",
];

/// One attendance observation extracted from a gate export.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub employee_name: String,
    pub badge_key: String,
    pub date: String,       // DD.MM.YYYY
    pub entry_time: String, // "" when not observed
    pub exit_time: String,  // "" when not observed
    pub minutes: i64,       // 0 unless kind == Full
    pub kind: EventKind,
}

impl AttendanceEvent {
    /// Worked time as `H:MM`, empty for partial events.
    pub fn hours(&self) -> String {
        format_minutes(self.minutes)
    }

    pub fn header_row() -> RawRow {
        EVENT_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    /// Flatten into the 8-column table layout.
    pub fn to_row(&self) -> RawRow {
        vec![
            self.employee_name.clone(),
            self.badge_key.clone(),
            self.date.clone(),
            self.entry_time.clone(),
            self.exit_time.clone(),
            self.minutes.to_string(),
            self.hours(),
            self.kind.as_str().to_string(),
        ]
    }
}
