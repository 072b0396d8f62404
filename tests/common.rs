#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn gs() -> Command {
    cargo_bin_cmd!("gatesheet")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gatesheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty directory inside tempdir
pub fn temp_folder(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gatesheet_inbox", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp folder");
    path
}

/// Two employees, two days, one entry-only observation plus titles and footers.
pub const SAMPLE_EXPORT: &str = "\
Суммарный отчет рабочего времени;;;;;;
Устройство входа;Дата;Время;Устройство выхода;Дата;Время;Итого
Иванов Иван Иванович;;;Номер ключа:;;00012345;
Проходная-1;01.03.2024;08:55;Проходная-2;01.03.2024;18:02;9:07
Проходная-1;02.03.2024;09:00;;;;
Петров Пётр;;;Номер ключа:;;00067890;
Проходная-1;01.03.2024;09:10;Проходная-2;01.03.2024;17:40;8:30
Всего времени:;;;;;;17:37
Страница;1;;;;;
";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write test file");
    path
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Initialize a DB through the CLI in test mode
pub fn init_db(db_path: &str) {
    gs().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
