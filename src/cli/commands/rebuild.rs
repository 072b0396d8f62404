use crate::cli::commands::{aggregate, extract, open_db};
use crate::config::Config;
use crate::errors::AppResult;

/// Extract and aggregate again from whatever is in the raw dataset.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    extract::run(&mut pool, cfg)?;
    aggregate::run(&mut pool, cfg)?;
    Ok(())
}
