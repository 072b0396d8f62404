mod common;
use common::row;
use gatesheet::core::classifier::{
    ExtractionMode, FixedColumns, ModeExtractor, PatternScan, RowClass, RowExtractor, classify,
    is_date_cell, is_time_cell,
};
use gatesheet::models::event_kind::EventKind;

#[test]
fn test_header_row_takes_key_two_cells_after_marker() {
    let r = row(&["Иванов И.И.", "", "", "Номер ключа:", "", "00012345"]);
    assert_eq!(
        classify(&r),
        RowClass::Header {
            employee: "Иванов И.И.".into(),
            badge_key: "00012345".into()
        }
    );
}

#[test]
fn test_header_row_falls_back_to_adjacent_key() {
    let r = row(&["Ivanov I.I.", "", "", "Номер ключа:", "12345"]);
    assert_eq!(
        classify(&r),
        RowClass::Header {
            employee: "Ivanov I.I.".into(),
            badge_key: "12345".into()
        }
    );

    let r = row(&["Ivanov I.I.", "Номер ключа:"]);
    assert_eq!(
        classify(&r),
        RowClass::Header {
            employee: "Ivanov I.I.".into(),
            badge_key: String::new()
        }
    );
}

#[test]
fn test_noise_rows() {
    for r in [
        row(&["Устройство входа", "Дата", "Время"]),
        row(&["Суммарный отчет рабочего времени"]),
        row(&["", "", "Всего времени:", "40:00"]),
        row(&["Страница", "2"]),
        row(&["", "", ""]),
        row(&[]),
    ] {
        assert_eq!(classify(&r), RowClass::Noise, "row {r:?}");
    }
}

#[test]
fn test_event_row_is_candidate() {
    let r = row(&["DeviceA", "01.03.2024", "08:55"]);
    assert_eq!(classify(&r), RowClass::Candidate);
}

#[test]
fn test_cell_patterns() {
    assert!(is_date_cell("01.03.2024"));
    assert!(!is_date_cell("1.3.2024"));
    assert!(is_time_cell("8:55"));
    assert!(is_time_cell("18:02"));
    assert!(!is_time_cell("18:02:00"));
}

#[test]
fn test_pattern_scan_full_pair() {
    let r = row(&[
        "DeviceA",
        "01.03.2024",
        "08:55",
        "DeviceB",
        "01.03.2024",
        "18:02",
        "9:07",
    ]);
    let ev = PatternScan::default().extract(&r).expect("full event");

    assert_eq!(ev.kind, EventKind::Full);
    assert_eq!(ev.date, "01.03.2024");
    assert_eq!(ev.entry_time, "08:55");
    assert_eq!(ev.exit_time, "18:02");
    assert_eq!(ev.entry_device, "DeviceA");
    assert_eq!(ev.exit_device, "DeviceB");
    assert_eq!(ev.duration.as_deref(), Some("9:07"));
}

#[test]
fn test_pattern_scan_finds_cells_anywhere() {
    let r = row(&[
        "",
        "Турникет 1",
        "",
        "01.03.2024",
        "08:55",
        "Турникет 2",
        "01.03.2024",
        "18:02",
        "",
        "9:07",
    ]);
    let ev = PatternScan::default().extract(&r).expect("full event");

    assert_eq!(ev.kind, EventKind::Full);
    assert_eq!(ev.entry_device, "Турникет 1");
    assert_eq!(ev.exit_device, "Турникет 2");
    assert_eq!(ev.duration.as_deref(), Some("9:07"));
}

#[test]
fn test_pattern_scan_full_pair_without_duration() {
    let r = row(&["DeviceA", "01.03.2024", "08:55", "DeviceB", "01.03.2024", "18:02", ""]);
    let ev = PatternScan::default().extract(&r).expect("full event");
    assert_eq!(ev.kind, EventKind::Full);
    assert_eq!(ev.duration, None);
}

#[test]
fn test_pattern_scan_single_observation_uses_device_column() {
    let entry = row(&["DeviceA", "02.03.2024", "09:00", "", "", "", ""]);
    let ev = PatternScan::default().extract(&entry).expect("entry");
    assert_eq!(ev.kind, EventKind::EntryOnly);
    assert_eq!(ev.entry_time, "09:00");
    assert_eq!(ev.exit_time, "");

    let exit = row(&["", "", "", "", "", "DeviceB", "02.03.2024", "18:00"]);
    let ev = PatternScan::default().extract(&exit).expect("exit");
    assert_eq!(ev.kind, EventKind::ExitOnly);
    assert_eq!(ev.exit_time, "18:00");
    assert_eq!(ev.exit_device, "DeviceB");

    // No device at all reads as an exit.
    let bare = row(&["02.03.2024", "18:00"]);
    assert_eq!(
        PatternScan::default().extract(&bare).map(|e| e.kind),
        Some(EventKind::ExitOnly)
    );
}

#[test]
fn test_pattern_scan_threshold_is_configurable() {
    let r = row(&["", "", "", "DeviceB", "02.03.2024", "18:00"]);

    let narrow = PatternScan {
        entry_device_max_column: 3,
    };
    let wide = PatternScan {
        entry_device_max_column: 4,
    };

    assert_eq!(narrow.extract(&r).map(|e| e.kind), Some(EventKind::ExitOnly));
    assert_eq!(wide.extract(&r).map(|e| e.kind), Some(EventKind::EntryOnly));
}

#[test]
fn test_pattern_scan_rejects_rows_without_pattern() {
    assert!(PatternScan::default().extract(&row(&["just", "text"])).is_none());
    assert!(
        PatternScan::default()
            .extract(&row(&["01.03.2024", "02.03.2024"]))
            .is_none()
    );
}

#[test]
fn test_fixed_columns_layout() {
    let full = row(&["A", "01.03", "08:55", "B", "01.03", "18:02", "9:07"]);
    let ev = FixedColumns.extract(&full).expect("full");
    assert_eq!(ev.kind, EventKind::Full);
    assert_eq!(ev.date, "01.03");
    assert_eq!(ev.duration.as_deref(), Some("9:07"));

    let entry = row(&["A", "01.03", "08:55", "", "", "", ""]);
    assert_eq!(
        FixedColumns.extract(&entry).map(|e| e.kind),
        Some(EventKind::EntryOnly)
    );

    let exit = row(&["", "", "", "B", "01.03", "18:02"]);
    assert_eq!(
        FixedColumns.extract(&exit).map(|e| e.kind),
        Some(EventKind::ExitOnly)
    );

    let partial = row(&["A", "01.03", "", "B", "", ""]);
    assert!(FixedColumns.extract(&partial).is_none());
}

#[test]
fn test_mode_extractor_selection() {
    // Non-canonical date: only the forced fixed layout reads it.
    let r = row(&["A", "01.03", "08:55", "B", "01.03", "18:02", "9:07"]);

    let auto = ModeExtractor::default();
    let pattern = ModeExtractor::new(ExtractionMode::Pattern, 5);
    let fixed = ModeExtractor::new(ExtractionMode::Fixed, 5);

    assert!(auto.extract(&r).is_none());
    assert!(pattern.extract(&r).is_none());
    assert_eq!(fixed.extract(&r).map(|e| e.kind), Some(EventKind::Full));
}

#[test]
fn test_auto_mode_rejects_column_titles_and_long_times() {
    let auto = ModeExtractor::default();

    let titles = row(&[
        "Точка входа",
        "Дата",
        "Время",
        "Точка выхода",
        "Дата",
        "Время",
        "Итого",
    ]);
    assert!(auto.extract(&titles).is_none());

    let seconds = row(&[
        "Турникет 1",
        "01.03.2024",
        "08:55:00",
        "Турникет 2",
        "01.03.2024",
        "18:02:00",
        "",
    ]);
    assert!(auto.extract(&seconds).is_none());
}

#[test]
fn test_auto_mode_accepts_canonical_fixed_row() {
    // One date with two times: the pattern scan gives up, the fixed layout reads an entry.
    let r = row(&["A", "01.03.2024", "08:55", "", "", "", "9:07"]);
    assert!(PatternScan::default().extract(&r).is_none());

    let ev = ModeExtractor::default().extract(&r).expect("entry");
    assert!(ev.has_canonical_cells());
    assert_eq!(ev.kind, EventKind::EntryOnly);
    assert_eq!(ev.date, "01.03.2024");
}

#[test]
fn test_extraction_mode_from_config_text() {
    let mode: ExtractionMode = serde_yaml::from_str("fixed").unwrap();
    assert_eq!(mode, ExtractionMode::Fixed);
    assert_eq!(ExtractionMode::default(), ExtractionMode::Auto);
}
