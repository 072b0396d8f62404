use crate::cli::commands::{extractor, log_op, open_db};
use crate::config::Config;
use crate::core::pipeline::{ExtractSummary, Pipeline};
use crate::db::log::Operation;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::EVENTS_DATASET;
use crate::ui::messages::{info, success};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    run(&mut pool, cfg)?;
    Ok(())
}

pub(crate) fn run(pool: &mut DbPool, cfg: &Config) -> AppResult<ExtractSummary> {
    let summary = Pipeline::new(pool, extractor(cfg)).extract()?;

    log_op(
        pool,
        Operation::Extract,
        EVENTS_DATASET,
        &format!(
            "rows={} events={} orphans={} unrecognized={}",
            summary.rows, summary.events, summary.orphans, summary.unrecognized
        ),
    );

    success(format!(
        "Extracted {} event(s) from {} row(s)",
        summary.events, summary.rows
    ));
    if summary.unrecognized > 0 {
        info(format!(
            "{} row(s) matched no event pattern",
            summary.unrecognized
        ));
    }
    Ok(summary)
}
