use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use crate::store::ALL_DATASETS;
use rusqlite::{Connection, OptionalExtension};

/// Bring the schema up to date and check that every pipeline dataset is
/// registered.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    for name in ALL_DATASETS {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM datasets WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(AppError::MissingDataset(name.to_string()));
        }
    }

    Ok(())
}
