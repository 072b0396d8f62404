// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Make sure an export can be written to `path`.
///
/// Missing parent directories are created. An existing file is replaced only
/// with `force` or after the user confirms on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    if confirm(io::stdin().lock())? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "'{}' already exists and was not overwritten",
            path.display()
        )))
    }
}

/// Read one answer line; only `y` / `yes` confirm. End of input means no.
fn confirm<R: BufRead>(mut input: R) -> AppResult<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
