use crate::core::classifier::{DEFAULT_ENTRY_DEVICE_MAX_COLUMN, ExtractionMode};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROCESSED_PREFIX: &str = "[Обработан] ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Folder watched for gate exports.
    #[serde(default = "default_gate_folder")]
    pub gate_folder: String,
    #[serde(default = "default_processed_prefix")]
    pub processed_prefix: String,
    /// Styled workbook written by `render`.
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default)]
    pub extraction_mode: ExtractionMode,
    /// Single-observation rows whose device sits left of this column count
    /// as entries.
    #[serde(default = "default_entry_device_max_column")]
    pub entry_device_max_column: usize,
    #[serde(default = "default_display_utc_offset")]
    pub display_utc_offset_hours: i32,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_gate_folder() -> String {
    Config::config_dir().join("inbox").to_string_lossy().to_string()
}
fn default_processed_prefix() -> String {
    DEFAULT_PROCESSED_PREFIX.to_string()
}
fn default_report_file() -> String {
    Config::config_dir()
        .join("timesheet.xlsx")
        .to_string_lossy()
        .to_string()
}
fn default_entry_device_max_column() -> usize {
    DEFAULT_ENTRY_DEVICE_MAX_COLUMN
}
fn default_display_utc_offset() -> i32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            gate_folder: default_gate_folder(),
            processed_prefix: default_processed_prefix(),
            report_file: default_report_file(),
            extraction_mode: ExtractionMode::default(),
            entry_device_max_column: default_entry_device_max_column(),
            display_utc_offset_hours: default_display_utc_offset(),
        }
    }
}

impl Config {
    /// Platform config directory (`~/.gatesheet`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gatesheet")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("gatesheet.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("gatesheet.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn gate_folder_path(&self) -> PathBuf {
        expand_tilde(&self.gate_folder)
    }

    pub fn report_path(&self) -> PathBuf {
        expand_tilde(&self.report_file)
    }

    /// Create the config directory, the config file (unless `is_test`) and an
    /// empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !Path::new(&db_path).exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {}", db_path.display()));
        Ok(db_path)
    }
}
