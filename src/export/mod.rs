// src/export/mod.rs

mod fs_utils;
pub mod report;
mod table;

pub use report::XlsxReport;
pub use table::export_table;

use crate::store::{EVENTS_DATASET, TIMESHEET_DATASET};
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Dataset that can be exported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Events,
    Timesheet,
}

impl ExportTable {
    pub fn dataset(&self) -> &'static str {
        match self {
            ExportTable::Events => EVENTS_DATASET,
            ExportTable::Timesheet => TIMESHEET_DATASET,
        }
    }
}
