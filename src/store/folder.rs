//! Local folder acting as the drop box for gate exports.

use super::sheet::{read_csv, read_workbook};
use super::{DocumentHandle, DocumentStore};
use crate::errors::{AppError, AppResult};
use crate::models::RawRow;
use std::fs;
use std::path::{Path, PathBuf};

pub const XLSX_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLS_TYPE: &str = "application/vnd.ms-excel";
pub const ODS_TYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";
pub const CSV_TYPE: &str = "text/csv";

/// Content type from the file extension; `None` for anything we can't read.
pub fn content_type_of(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" => Some(XLSX_TYPE),
        "xls" => Some(XLS_TYPE),
        "ods" => Some(ODS_TYPE),
        "csv" => Some(CSV_TYPE),
        _ => None,
    }
}

pub struct FolderStore {
    dir: PathBuf,
    processed_prefix: String,
}

impl FolderStore {
    /// Open the folder, creating it when missing.
    pub fn open(dir: impl Into<PathBuf>, processed_prefix: &str) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            processed_prefix: processed_prefix.to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentStore for FolderStore {
    type Document = FolderDocument;

    fn list_unprocessed(&self) -> AppResult<Vec<FolderDocument>> {
        let mut docs = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with(&self.processed_prefix) {
                continue;
            }

            if let Some(content_type) = content_type_of(&path) {
                docs.push(FolderDocument {
                    name: name.to_string(),
                    path: path.clone(),
                    content_type,
                    processed_prefix: self.processed_prefix.clone(),
                });
            }
        }

        docs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(docs)
    }
}

#[derive(Debug, Clone)]
pub struct FolderDocument {
    name: String,
    path: PathBuf,
    content_type: &'static str,
    processed_prefix: String,
}

impl FolderDocument {
    /// A single file outside any folder store, for one-off imports.
    pub fn from_path(path: &Path, processed_prefix: &str) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )));
        }

        let content_type = content_type_of(path)
            .ok_or_else(|| AppError::UnsupportedDocument(path.display().to_string()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::UnsupportedDocument(path.display().to_string()))?
            .to_string();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            content_type,
            processed_prefix: processed_prefix.to_string(),
        })
    }
}

impl DocumentHandle for FolderDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> &str {
        self.content_type
    }

    fn read_as_table(&self) -> AppResult<Vec<RawRow>> {
        match self.content_type {
            CSV_TYPE => read_csv(&self.path),
            _ => read_workbook(&self.path),
        }
    }

    fn mark_processed(&mut self) -> AppResult<()> {
        if self.name.starts_with(&self.processed_prefix) {
            return Ok(());
        }

        let new_name = format!("{}{}", self.processed_prefix, self.name);
        let new_path = self.path.with_file_name(&new_name);
        fs::rename(&self.path, &new_path)?;

        self.name = new_name;
        self.path = new_path;
        Ok(())
    }
}
