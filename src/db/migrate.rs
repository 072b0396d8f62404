use crate::store::ALL_DATASETS;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the dataset catalog and the row storage.
fn create_dataset_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS datasets (
            name        TEXT PRIMARY KEY,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dataset_rows (
            dataset  TEXT NOT NULL REFERENCES datasets(name) ON DELETE CASCADE,
            row_idx  INTEGER NOT NULL,
            cells    TEXT NOT NULL,
            PRIMARY KEY (dataset, row_idx)
        );
        "#,
    )?;
    Ok(())
}

/// Register the pipeline datasets. Existing ones keep their rows.
fn register_datasets(conn: &Connection) -> Result<usize> {
    let mut created = 0;
    for name in ALL_DATASETS {
        created += conn.execute(
            "INSERT OR IGNORE INTO datasets (name, updated_at) VALUES (?1, datetime('now'))",
            params![name],
        )?;
    }
    Ok(created)
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "dataset_rows")? {
        create_dataset_tables(conn)?;
        mark_applied(conn, "0001_dataset_tables", "Created dataset tables")?;
        success("Created dataset tables.");
    }

    let created = register_datasets(conn)?;
    if created > 0 {
        success(format!("Registered {created} dataset(s)."));
    }

    Ok(())
}
