use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{SAMPLE_EXPORT, gs, init_db, setup_test_db, temp_folder, temp_out, write_file};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    gs().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_process_show_and_export() {
    let db_path = setup_test_db("cli_process");
    let folder = temp_folder("cli_process");
    let folder_str = folder.to_string_lossy().to_string();
    let report = temp_out("cli_process_report", "xlsx");
    write_file(&folder, "march.csv", SAMPLE_EXPORT);

    init_db(&db_path);

    gs().args([
        "--db",
        &db_path,
        "--folder",
        &folder_str,
        "--report",
        &report,
        "pending",
    ])
    .assert()
    .success()
    .stdout(contains("march.csv"));

    gs().args([
        "--db",
        &db_path,
        "--folder",
        &folder_str,
        "--report",
        &report,
        "process",
    ])
    .assert()
    .success()
    .stdout(contains("Processed: 1").and(contains("Failed: 0")));

    assert!(folder.join("[Обработан] march.csv").exists());
    assert!(std::path::Path::new(&report).exists());

    gs().args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(
            contains("Иванов Иван Иванович")
                .and(contains("9:07"))
                .and(contains("ИТОГО")),
        );

    gs().args(["--db", &db_path, "show", "--events"])
        .assert()
        .success()
        .stdout(contains("ENTRY_ONLY").and(contains("00067890")));

    let csv_out = temp_out("cli_export_events", "csv");
    gs().args([
        "--db", &db_path, "export", "--table", "events", "--format", "csv", "--file", &csv_out,
        "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    assert!(content.starts_with("employee_name,badge_key,date"));
    assert!(content.contains("FULL"));
    assert!(content.contains("Петров Пётр"));

    let json_out = temp_out("cli_export_timesheet", "json");
    gs().args([
        "--db", &db_path, "export", "--format", "json", "--file", &json_out, "--force",
    ])
    .assert()
    .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(json["dataset"], "timesheet");
    assert_eq!(json["columns"][0], "ФИО");
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);

    gs().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("process").and(contains("march.csv")));
}

#[test]
fn test_process_json_reports_failures_without_aborting() {
    let db_path = setup_test_db("cli_process_json");
    let folder = temp_folder("cli_process_json");
    let folder_str = folder.to_string_lossy().to_string();
    let report = temp_out("cli_process_json_report", "xlsx");
    write_file(&folder, "a_broken.xlsx", "garbage");
    write_file(&folder, "b_march.csv", SAMPLE_EXPORT);

    init_db(&db_path);

    gs().args([
        "--db",
        &db_path,
        "--folder",
        &folder_str,
        "--report",
        &report,
        "process",
        "--json",
    ])
    .assert()
    .success()
    .stdout(
        contains("\"succeeded\": 1")
            .and(contains("\"failed\": 1"))
            .and(contains("a_broken.xlsx")),
    );
}

#[test]
fn test_process_with_nothing_pending() {
    let db_path = setup_test_db("cli_nothing_pending");
    let folder = temp_folder("cli_nothing_pending");
    let folder_str = folder.to_string_lossy().to_string();

    init_db(&db_path);

    gs().args(["--db", &db_path, "--folder", &folder_str, "process"])
        .assert()
        .success()
        .stdout(contains("No pending files"));
}

#[test]
fn test_manual_stages() {
    let db_path = setup_test_db("cli_manual_stages");
    let folder = temp_folder("cli_manual_stages");
    let file = write_file(&folder, "march.csv", SAMPLE_EXPORT);
    let file_str = file.to_string_lossy().to_string();

    init_db(&db_path);

    gs().args(["--db", &db_path, "import", &file_str])
        .assert()
        .success()
        .stdout(contains("Imported 9 row(s)"));

    gs().args(["--db", &db_path, "extract"])
        .assert()
        .success()
        .stdout(contains("Extracted 3 event(s)"));

    gs().args(["--db", &db_path, "aggregate"])
        .assert()
        .success()
        .stdout(contains("2 employee(s)"));

    gs().args(["--db", &db_path, "rebuild"])
        .assert()
        .success()
        .stdout(contains("Extracted 3 event(s)").and(contains("2 employee(s)")));

    // Manual import does not rename the file.
    assert!(file.exists());
}

#[test]
fn test_aggregate_without_events_fails() {
    let db_path = setup_test_db("cli_aggregate_empty");
    init_db(&db_path);

    gs().args(["--db", &db_path, "aggregate"])
        .assert()
        .failure()
        .stderr(contains("No data in gate_events"));
}

#[test]
fn test_import_rejects_unknown_file_type() {
    let db_path = setup_test_db("cli_import_unknown");
    let folder = temp_folder("cli_import_unknown");
    let file = write_file(&folder, "notes.txt", "hello");

    init_db(&db_path);

    gs().args(["--db", &db_path, "import", &file.to_string_lossy()])
        .assert()
        .failure()
        .stderr(contains("Unsupported document type"));
}

#[test]
fn test_export_refuses_to_overwrite_without_confirmation() {
    let db_path = setup_test_db("cli_export_no_overwrite");
    init_db(&db_path);

    let out = temp_out("cli_export_no_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    gs().args([
        "--db", &db_path, "export", "--table", "events", "--format", "csv", "--file", &out,
    ])
    .write_stdin("n\n")
    .assert()
    .failure()
    .stderr(contains("was not overwritten"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");
}
