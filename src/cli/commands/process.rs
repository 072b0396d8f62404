use crate::cli::commands::{extractor, log_op, open_db, report};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::{BatchReport, Pipeline};
use crate::db::log::Operation;
use crate::errors::AppResult;
use crate::store::folder::FolderStore;
use crate::ui::messages::{header, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let json = matches!(cmd, Commands::Process { json: true });

    let mut pool = open_db(cfg)?;
    let store = FolderStore::open(cfg.gate_folder_path(), &cfg.processed_prefix)?;
    let formatter = report(cfg);

    let batch = Pipeline::new(&mut pool, extractor(cfg))
        .with_formatter(&formatter)
        .process_pending(&store)?;

    for outcome in &batch.results {
        match (&outcome.stats, &outcome.error) {
            (Some(stats), _) => {
                log_op(
                    &pool,
                    Operation::Process,
                    &outcome.file,
                    &format!(
                        "rows={} events={} employees={} days={}",
                        stats.rows, stats.events, stats.employees, stats.days
                    ),
                );
                log_op(&pool, Operation::Mark, &outcome.file, "Marked as processed");
            }
            (None, Some(err)) => log_op(&pool, Operation::Fail, &outcome.file, err),
            (None, None) => {}
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        print_summary(&batch);
    }

    Ok(())
}

fn print_summary(batch: &BatchReport) {
    if batch.is_empty() {
        info("No pending files to process");
        return;
    }

    header("Batch report");
    for outcome in &batch.results {
        match (&outcome.stats, &outcome.error) {
            (Some(s), _) => success(format!(
                "{}: {} rows, {} events, {} employees, {} days",
                outcome.file, s.rows, s.events, s.employees, s.days
            )),
            (None, err) => warning(format!(
                "{}: {}",
                outcome.file,
                err.as_deref().unwrap_or("failed")
            )),
        }
    }
    println!();
    info(format!(
        "Processed: {}  |  Failed: {}",
        batch.succeeded, batch.failed
    ));
}
