//! Internal operation log, stored in the `log` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Operations recorded by the CLI. Migrations write their own rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Init,
    Import,
    Extract,
    Aggregate,
    Render,
    Process,
    Mark,
    Fail,
    Export,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Import => "import",
            Operation::Extract => "extract",
            Operation::Aggregate => "aggregate",
            Operation::Render => "render",
            Operation::Process => "process",
            Operation::Mark => "mark",
            Operation::Fail => "fail",
            Operation::Export => "export",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: Operation, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![now, operation.as_str(), target, message])?;

    Ok(())
}

/// All log rows, oldest first. RFC 3339 dates are reformatted, others kept.
pub fn read_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(raw_date);

        Ok(LogEntry {
            id: row.get(0)?,
            date,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(entries)
}
