use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::log::read_log;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if !*print {
            info("Nothing to do: use `gatesheet log --print`");
            return Ok(());
        }

        let pool = open_db(cfg)?;
        let entries = read_log(&pool.conn)?;
        LogLogic::print_log(&entries);
    }

    Ok(())
}
