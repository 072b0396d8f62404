mod common;
use calamine::{Data, Reader, open_workbook_auto};
use common::{SAMPLE_EXPORT, row, temp_folder, temp_out, write_file};
use gatesheet::core::classifier::ModeExtractor;
use gatesheet::core::pipeline::Pipeline;
use gatesheet::db::initialize::init_db;
use gatesheet::db::pool::DbPool;
use gatesheet::errors::AppError;
use gatesheet::export::XlsxReport;
use gatesheet::store::folder::{FolderDocument, FolderStore};
use gatesheet::store::{DatasetStore, EVENTS_DATASET, RAW_DATASET, TIMESHEET_DATASET};
use std::path::PathBuf;

const PREFIX: &str = "[Обработан] ";

fn fresh_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

fn expected_matrix() -> Vec<Vec<String>> {
    vec![
        row(&["ФИО", "01.03", "02.03", "ИТОГО"]),
        row(&["Иванов Иван Иванович", "9:07", "", "9:07"]),
        row(&["Петров Пётр", "8:30", "", "8:30"]),
    ]
}

#[test]
fn test_stages_run_one_by_one() {
    let dir = temp_folder("stages_one_by_one");
    let path = write_file(&dir, "march.csv", SAMPLE_EXPORT);
    let doc = FolderDocument::from_path(&path, PREFIX).unwrap();

    let mut pool = fresh_pool();
    let mut pipeline = Pipeline::new(&mut pool, ModeExtractor::default());

    assert_eq!(pipeline.import(&doc).unwrap(), 9);

    let extracted = pipeline.extract().unwrap();
    assert_eq!(extracted.events, 3);
    assert_eq!(extracted.orphans, 0);

    let summary = pipeline.aggregate().unwrap();
    assert_eq!(summary.employees, 2);
    assert_eq!(summary.days, 2);
    assert_eq!(summary.first_date, "01.03.2024");
    assert_eq!(summary.last_date, "02.03.2024");

    let events = pool.read_table(EVENTS_DATASET).unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[2],
        row(&[
            "Иванов Иван Иванович",
            "00012345",
            "02.03.2024",
            "09:00",
            "",
            "0",
            "",
            "ENTRY_ONLY"
        ])
    );
    assert_eq!(pool.read_table(TIMESHEET_DATASET).unwrap(), expected_matrix());
}

#[test]
fn test_rerun_gives_identical_tables() {
    let dir = temp_folder("rerun_identical");
    let path = write_file(&dir, "march.csv", SAMPLE_EXPORT);
    let doc = FolderDocument::from_path(&path, PREFIX).unwrap();

    let mut pool = fresh_pool();
    let mut snapshots = Vec::new();
    for _ in 0..2 {
        let mut pipeline = Pipeline::new(&mut pool, ModeExtractor::default());
        pipeline.import(&doc).unwrap();
        pipeline.extract().unwrap();
        pipeline.aggregate().unwrap();
        snapshots.push((
            pool.read_table(EVENTS_DATASET).unwrap(),
            pool.read_table(TIMESHEET_DATASET).unwrap(),
        ));
    }

    assert_eq!(snapshots[0], snapshots[1]);
}

#[test]
fn test_batch_isolates_failing_files() {
    let dir = temp_folder("batch_isolation");
    write_file(&dir, "a_broken.xlsx", "not a workbook");
    write_file(&dir, "b_march.csv", SAMPLE_EXPORT);
    let store = FolderStore::open(&dir, PREFIX).unwrap();

    let mut pool = fresh_pool();
    let report = Pipeline::new(&mut pool, ModeExtractor::default())
        .process_pending(&store)
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    let broken = &report.results[0];
    assert_eq!(broken.file, "a_broken.xlsx");
    assert!(!broken.ok);
    assert!(broken.error.is_some());
    assert!(broken.stats.is_none());

    let good = &report.results[1];
    assert_eq!(good.file, "b_march.csv");
    assert!(good.ok);
    let stats = good.stats.as_ref().unwrap();
    assert_eq!((stats.rows, stats.events, stats.employees), (9, 3, 2));

    assert!(dir.join("a_broken.xlsx").exists());
    assert!(dir.join("[Обработан] b_march.csv").exists());
    assert_eq!(pool.read_table(TIMESHEET_DATASET).unwrap(), expected_matrix());

    // Second run: only the broken file is still pending.
    let again = Pipeline::new(&mut pool, ModeExtractor::default())
        .process_pending(&store)
        .unwrap();
    assert_eq!((again.succeeded, again.failed), (0, 1));
}

#[test]
fn test_empty_folder_is_a_successful_no_op() {
    let dir = temp_folder("empty_batch");
    let store = FolderStore::open(&dir, PREFIX).unwrap();

    let mut pool = fresh_pool();
    let report = Pipeline::new(&mut pool, ModeExtractor::default())
        .process_pending(&store)
        .unwrap();

    assert!(report.is_empty());
    assert_eq!((report.succeeded, report.failed), (0, 0));
}

#[test]
fn test_file_without_events_fails_and_keeps_previous_matrix() {
    let dir = temp_folder("no_events_keeps_matrix");
    write_file(&dir, "a_march.csv", SAMPLE_EXPORT);
    write_file(&dir, "b_empty.csv", "Страница;1\n;;\n");
    let store = FolderStore::open(&dir, PREFIX).unwrap();

    let mut pool = fresh_pool();
    let report = Pipeline::new(&mut pool, ModeExtractor::default())
        .process_pending(&store)
        .unwrap();

    assert_eq!((report.succeeded, report.failed), (1, 1));
    assert!(
        report.results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("No data")
    );
    assert!(dir.join("b_empty.csv").exists());
    assert_eq!(pool.read_table(TIMESHEET_DATASET).unwrap(), expected_matrix());
}

#[test]
fn test_extract_requires_raw_dataset() {
    let mut pool = DbPool::in_memory().unwrap();
    gatesheet::db::migrate::run_pending_migrations(&pool.conn).unwrap();
    pool.conn
        .execute("DELETE FROM datasets WHERE name = ?1", [RAW_DATASET])
        .unwrap();

    let result = Pipeline::new(&mut pool, ModeExtractor::default()).extract();
    assert!(matches!(result, Err(AppError::MissingDataset(name)) if name == RAW_DATASET));
}

#[test]
fn test_render_writes_styled_report() {
    let dir = temp_folder("render_report");
    let path = write_file(&dir, "march.csv", SAMPLE_EXPORT);
    let doc = FolderDocument::from_path(&path, PREFIX).unwrap();
    let out = PathBuf::from(temp_out("render_report", "xlsx"));
    let report = XlsxReport::new(out.clone(), 3);

    let mut pool = fresh_pool();
    let mut pipeline = Pipeline::new(&mut pool, ModeExtractor::default()).with_formatter(&report);
    pipeline.import(&doc).unwrap();
    pipeline.extract().unwrap();
    pipeline.aggregate().unwrap();
    pipeline.render().unwrap();

    let mut workbook = open_workbook_auto(&out).expect("open rendered report");
    assert_eq!(workbook.sheet_names(), vec!["табель", "gate_events"]);

    let sheet = workbook.worksheet_range("табель").unwrap();
    assert_eq!(
        sheet.get_value((0, 0)),
        Some(&Data::String("ТАБЕЛЬ УЧЁТА РАБОЧЕГО ВРЕМЕНИ".into()))
    );
    assert_eq!(
        sheet.get_value((1, 0)),
        Some(&Data::String("Период: 01.03.2024 - 02.03.2024".into()))
    );
    assert_eq!(
        sheet.get_value((6, 0)),
        Some(&Data::String("ФИО".into()))
    );
    assert_eq!(
        sheet.get_value((7, 1)),
        Some(&Data::String("9:07".into()))
    );

    let events = workbook.worksheet_range("gate_events").unwrap();
    assert_eq!(events.get_value((1, 5)), Some(&Data::Float(547.0)));
    assert_eq!(
        events.get_value((1, 7)),
        Some(&Data::String("FULL".into()))
    );

    // Rendering leaves the tables as they were.
    assert_eq!(pool.read_table(TIMESHEET_DATASET).unwrap(), expected_matrix());
}
