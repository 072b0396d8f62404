use crate::cli::commands::{extractor, log_op, open_db};
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::db::log::Operation;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::timesheet::TimesheetSummary;
use crate::store::TIMESHEET_DATASET;
use crate::ui::messages::success;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    run(&mut pool, cfg)?;
    Ok(())
}

pub(crate) fn run(pool: &mut DbPool, cfg: &Config) -> AppResult<TimesheetSummary> {
    let summary = Pipeline::new(pool, extractor(cfg)).aggregate()?;

    log_op(
        pool,
        Operation::Aggregate,
        TIMESHEET_DATASET,
        &format!(
            "employees={} days={} period={}..{}",
            summary.employees, summary.days, summary.first_date, summary.last_date
        ),
    );

    success(format!(
        "Timesheet built: {} employee(s) over {} day(s) ({} - {})",
        summary.employees, summary.days, summary.first_date, summary.last_date
    ));
    Ok(summary)
}
