use crate::config::Config;
use crate::errors::AppResult;
use crate::store::folder::FolderStore;
use crate::store::{DocumentHandle, DocumentStore};
use crate::ui::messages::info;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = FolderStore::open(cfg.gate_folder_path(), &cfg.processed_prefix)?;
    let docs = store.list_unprocessed()?;

    if docs.is_empty() {
        info(format!("No pending files in {}", store.dir().display()));
        return Ok(());
    }

    println!("📂 Pending files in {}:\n", store.dir().display());
    for doc in &docs {
        println!("  • {}  ({})", doc.name(), doc.content_type());
    }
    println!();
    info(format!("{} file(s) waiting", docs.len()));
    Ok(())
}
