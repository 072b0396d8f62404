//! Collaborator contracts of the pipeline: where exports come from, where
//! tables are persisted and who dresses them up afterwards.

pub mod folder;
pub mod sheet;

use crate::errors::AppResult;
use crate::models::RawRow;

/// Raw rows of the last imported export.
pub const RAW_DATASET: &str = "gate_raw";
/// Flat event table.
pub const EVENTS_DATASET: &str = "gate_events";
/// Employee × day matrix.
pub const TIMESHEET_DATASET: &str = "timesheet";

pub const ALL_DATASETS: [&str; 3] = [RAW_DATASET, EVENTS_DATASET, TIMESHEET_DATASET];

/// One exported document waiting in the store.
pub trait DocumentHandle {
    fn name(&self) -> &str;
    fn content_type(&self) -> &str;
    /// First sheet of the document as display text.
    fn read_as_table(&self) -> AppResult<Vec<RawRow>>;
    /// Tag the document as processed. Calling it twice is a no-op.
    fn mark_processed(&mut self) -> AppResult<()>;
}

pub trait DocumentStore {
    type Document: DocumentHandle;

    fn list_unprocessed(&self) -> AppResult<Vec<Self::Document>>;
}

/// Named tables with full-overwrite semantics.
pub trait DatasetStore {
    fn has_table(&self, name: &str) -> AppResult<bool>;
    fn read_table(&self, name: &str) -> AppResult<Vec<RawRow>>;
    /// Replace the whole content of `name` with `rows`.
    fn write_table(&mut self, name: &str, rows: &[RawRow]) -> AppResult<()>;
    fn clear_table(&mut self, name: &str) -> AppResult<()>;
}

/// Presentation layer over the written tables. Must not change their data.
pub trait TableFormatter {
    fn format(&self, datasets: &dyn DatasetStore) -> AppResult<()>;
}
