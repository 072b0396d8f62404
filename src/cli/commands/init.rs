use crate::cli::commands::log_op;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::Operation;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with `--test`)
///  - the SQLite database
///  - the dataset registry, through the migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    info("Initializing gatesheet…");

    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let display = db_path.display().to_string();

    let pool = DbPool::new(&db_path.to_string_lossy())?;
    init_db(&pool.conn)?;

    log_op(
        &pool,
        Operation::Init,
        "database",
        &format!("Database initialized at {display}"),
    );

    success(format!("Database initialized at {display}"));
    Ok(())
}
