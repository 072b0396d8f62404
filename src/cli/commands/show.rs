use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{DatasetStore, EVENTS_DATASET, TIMESHEET_DATASET};
use crate::ui::messages::info;
use crate::utils::colors::{BOLD, CYAN, color_for_hours, color_for_kind, paint};
use crate::utils::table::Table;

/// Kind column of the event table.
const KIND_COL: usize = 7;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let events = matches!(cmd, Commands::Show { events: true });
    let dataset = if events {
        EVENTS_DATASET
    } else {
        TIMESHEET_DATASET
    };

    let pool = open_db(cfg)?;
    let rows = pool.read_table(dataset)?;

    let Some((header, data)) = rows.split_first() else {
        info(format!("Dataset '{dataset}' is empty"));
        return Ok(());
    };
    if data.is_empty() {
        info(format!("Dataset '{dataset}' has no rows"));
        return Ok(());
    }

    let table = Table::from_rows(header, data);
    let last = header.len().saturating_sub(1);

    let text = table.render_with(|col, value, padded| {
        if events {
            if col == KIND_COL {
                paint(color_for_kind(value), padded)
            } else {
                padded.to_string()
            }
        } else if col == 0 {
            padded.to_string()
        } else if col == last {
            paint(&format!("{BOLD}{CYAN}"), padded)
        } else {
            paint(color_for_hours(value), padded)
        }
    });

    println!("{text}");
    info(format!("{} row(s) in '{dataset}'", data.len()));
    Ok(())
}
