//! Unified application error type.
//! Every module (store, db, core, export, cli) returns AppError so that the
//! per-file boundary of the pipeline can record failures in one shape.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Dataset store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Dataset '{0}' not found (run `gatesheet init` first)")]
    MissingDataset(String),

    #[error("Corrupted row {row} in dataset '{dataset}': {reason}")]
    CorruptRow {
        dataset: String,
        row: i64,
        reason: String,
    },

    // ---------------------------
    // Source documents
    // ---------------------------
    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Document '{0}' contains no sheets")]
    EmptyWorkbook(String),

    // ---------------------------
    // Pipeline stages
    // ---------------------------
    #[error("No data in {0}. Run `gatesheet extract` first")]
    NoEvents(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export / render errors
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report error: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
