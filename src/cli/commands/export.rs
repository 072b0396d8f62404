use crate::cli::commands::{log_op, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::Operation;
use crate::errors::AppResult;
use crate::export::export_table;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        table,
        format,
        file,
        force,
    } = cmd
    {
        let pool = open_db(cfg)?;
        let path = expand_tilde(file);
        let dataset = table.dataset();

        let rows = export_table(&pool, dataset, *format, &path, *force)?;

        log_op(
            &pool,
            Operation::Export,
            dataset,
            &format!("{rows} row(s) as {} to {}", format.as_str(), path.display()),
        );
    }
    Ok(())
}
