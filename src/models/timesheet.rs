use super::RawRow;
use crate::core::codec::{day_month, format_minutes};
use serde::Serialize;
use std::collections::BTreeMap;

pub const NAME_LABEL: &str = "ФИО";
pub const TOTAL_LABEL: &str = "ИТОГО";

/// Dense employee × date matrix of worked minutes.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Timesheet {
    /// Sorted ascending.
    pub employees: Vec<String>,
    /// Full `DD.MM.YYYY` dates in chronological order.
    pub dates: Vec<String>,
    /// employee → date → total minutes.
    pub cells: BTreeMap<String, BTreeMap<String, i64>>,
}

/// Counts reported back to the orchestrator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimesheetSummary {
    pub employees: usize,
    pub days: usize,
    pub first_date: String,
    pub last_date: String,
}

impl Timesheet {
    pub fn minutes(&self, employee: &str, date: &str) -> i64 {
        self.cells
            .get(employee)
            .and_then(|days| days.get(date))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the employee's cells over the date columns.
    pub fn employee_total(&self, employee: &str) -> i64 {
        self.dates
            .iter()
            .map(|d| self.minutes(employee, d))
            .filter(|m| *m > 0)
            .sum()
    }

    pub fn summary(&self) -> TimesheetSummary {
        TimesheetSummary {
            employees: self.employees.len(),
            days: self.dates.len(),
            first_date: self.dates.first().cloned().unwrap_or_default(),
            last_date: self.dates.last().cloned().unwrap_or_default(),
        }
    }

    pub fn header_row(&self) -> RawRow {
        let mut row = Vec::with_capacity(self.dates.len() + 2);
        row.push(NAME_LABEL.to_string());
        row.extend(self.dates.iter().map(|d| day_month(d)));
        row.push(TOTAL_LABEL.to_string());
        row
    }

    /// Matrix rows: header first, then one row per employee.
    pub fn to_rows(&self) -> Vec<RawRow> {
        let mut rows = Vec::with_capacity(self.employees.len() + 1);
        rows.push(self.header_row());

        for employee in &self.employees {
            let mut row = Vec::with_capacity(self.dates.len() + 2);
            row.push(employee.clone());
            for date in &self.dates {
                row.push(format_minutes(self.minutes(employee, date)));
            }
            row.push(format_minutes(self.employee_total(employee)));
            rows.push(row);
        }

        rows
    }
}
