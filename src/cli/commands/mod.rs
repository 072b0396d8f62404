//! One handler per subcommand, plus the wiring they share.

pub mod aggregate;
pub mod config;
pub mod export;
pub mod extract;
pub mod import;
pub mod init;
pub mod log;
pub mod pending;
pub mod process;
pub mod rebuild;
pub mod render;
pub mod show;

use crate::config::Config;
use crate::core::classifier::ModeExtractor;
use crate::db::log::{Operation, ttlog};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::XlsxReport;
use crate::ui::messages::warning;

pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let path = cfg.database_path();
    Ok(DbPool::new(&path.to_string_lossy())?)
}

pub(crate) fn extractor(cfg: &Config) -> ModeExtractor {
    ModeExtractor::new(cfg.extraction_mode, cfg.entry_device_max_column)
}

pub(crate) fn report(cfg: &Config) -> XlsxReport {
    XlsxReport::new(cfg.report_path(), cfg.display_utc_offset_hours)
}

/// Write an internal log line; a failure is only reported.
pub(crate) fn log_op(pool: &DbPool, operation: Operation, target: &str, message: &str) {
    if let Err(e) = ttlog(&pool.conn, operation, target, message) {
        warning(format!("Failed to write internal log: {e}"));
    }
}
