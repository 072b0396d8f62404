use crate::cli::commands::{extractor, log_op, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::db::log::Operation;
use crate::errors::AppResult;
use crate::store::folder::FolderDocument;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let doc = FolderDocument::from_path(&path, &cfg.processed_prefix)?;

        let mut pool = open_db(cfg)?;
        let rows = Pipeline::new(&mut pool, extractor(cfg)).import(&doc)?;

        log_op(&pool, Operation::Import, file, &format!("{rows} row(s) imported"));
        success(format!("Imported {rows} row(s) from {}", path.display()));
    }
    Ok(())
}
