//! SQLite-backed dataset store.
//!
//! Each dataset is a list of rows; a row is stored as a JSON array of its
//! cells under `(dataset, row_idx)`.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::RawRow;
use crate::store::DatasetStore;
use rusqlite::{OptionalExtension, params};

impl DbPool {
    fn require(&self, name: &str) -> AppResult<()> {
        if self.has_table(name)? {
            Ok(())
        } else {
            Err(AppError::MissingDataset(name.to_string()))
        }
    }

    /// Number of stored rows, header included.
    pub fn row_count(&self, name: &str) -> AppResult<usize> {
        self.require(name)?;
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM dataset_rows WHERE dataset = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}

impl DatasetStore for DbPool {
    fn has_table(&self, name: &str) -> AppResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM datasets WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn read_table(&self, name: &str) -> AppResult<Vec<RawRow>> {
        self.require(name)?;

        let mut stmt = self.conn.prepare_cached(
            "SELECT row_idx, cells FROM dataset_rows WHERE dataset = ?1 ORDER BY row_idx ASC",
        )?;

        let rows = stmt.query_map([name], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (idx, cells) = r?;
            let cells: RawRow =
                serde_json::from_str(&cells).map_err(|e| AppError::CorruptRow {
                    dataset: name.to_string(),
                    row: idx,
                    reason: e.to_string(),
                })?;
            out.push(cells);
        }

        Ok(out)
    }

    fn write_table(&mut self, name: &str, rows: &[RawRow]) -> AppResult<()> {
        self.require(name)?;

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM dataset_rows WHERE dataset = ?1", [name])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO dataset_rows (dataset, row_idx, cells) VALUES (?1, ?2, ?3)",
            )?;
            for (idx, row) in rows.iter().enumerate() {
                let cells = serde_json::to_string(row)?;
                stmt.execute(params![name, idx as i64, cells])?;
            }
        }
        tx.execute(
            "UPDATE datasets SET updated_at = datetime('now') WHERE name = ?1",
            [name],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn clear_table(&mut self, name: &str) -> AppResult<()> {
        self.write_table(name, &[])
    }
}
