pub mod event;
pub mod event_kind;
pub mod timesheet;

/// One row of a table as displayed: every cell is already text.
pub type RawRow = Vec<String>;
