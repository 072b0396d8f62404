use crate::cli::commands::{extractor, log_op, open_db, report};
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::db::log::Operation;
use crate::errors::AppResult;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    let formatter = report(cfg);

    Pipeline::new(&mut pool, extractor(cfg))
        .with_formatter(&formatter)
        .render()?;

    let target = formatter.path.display().to_string();
    log_op(&pool, Operation::Render, &target, "Report written");
    Ok(())
}
