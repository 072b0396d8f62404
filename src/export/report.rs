// src/export/report.rs

use crate::core::aggregator::date_range;
use crate::errors::{AppError, AppResult};
use crate::models::RawRow;
use crate::models::event_kind::EventKind;
use crate::store::{DatasetStore, EVENTS_DATASET, TIMESHEET_DATASET, TableFormatter};
use crate::ui::messages::info;
use chrono::{FixedOffset, Offset, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::fs;
use std::io;
use std::path::PathBuf;

pub const EVENTS_SHEET: &str = "gate_events";
pub const TIMESHEET_SHEET: &str = "табель";

/// Zero-based row of the matrix header on the timesheet sheet.
const MATRIX_HEADER_ROW: u32 = 6;

const FONT: &str = "Roboto";
const NAVY: u32 = 0x1E3A5F;

/// Styled workbook with the event table and the timesheet.
pub struct XlsxReport {
    pub path: PathBuf,
    /// Hours east of UTC for the "updated" stamp.
    pub utc_offset_hours: i32,
}

impl XlsxReport {
    pub fn new(path: PathBuf, utc_offset_hours: i32) -> Self {
        Self {
            path,
            utc_offset_hours,
        }
    }

    fn updated_stamp(&self) -> String {
        let offset = FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix());
        Utc::now()
            .with_timezone(&offset)
            .format("%d.%m.%Y %H:%M")
            .to_string()
    }
}

impl TableFormatter for XlsxReport {
    fn format(&self, datasets: &dyn DatasetStore) -> AppResult<()> {
        let events = datasets.read_table(EVENTS_DATASET)?;
        let matrix = datasets.read_table(TIMESHEET_DATASET)?;

        let (first, last) = date_range(&events).unwrap_or_default();

        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(TIMESHEET_SHEET)?;
        let header = TimesheetHeader {
            period: format!("Период: {first} - {last}"),
            stats: format!(
                "Сотрудников: {}  |  Дней: {}",
                matrix.len().saturating_sub(1),
                matrix.first().map(|h| h.len().saturating_sub(2)).unwrap_or(0)
            ),
            updated: format!("Обновлено: {}", self.updated_stamp()),
        };
        write_timesheet_sheet(sheet, &header, &matrix)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(EVENTS_SHEET)?;
        write_events_sheet(sheet, &events)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let path = self
            .path
            .to_str()
            .ok_or_else(|| AppError::from(io::Error::other("invalid report path")))?;
        workbook.save(path)?;

        info(format!("Report written: {}", self.path.display()));
        Ok(())
    }
}

struct TimesheetHeader {
    period: String,
    stats: String,
    updated: String,
}

fn base() -> Format {
    Format::new().set_font_name(FONT).set_font_size(10)
}

fn write_events_sheet(sheet: &mut Worksheet, rows: &[RawRow]) -> AppResult<()> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(());
    };
    let last_col = header.len().max(1) as u16 - 1;

    let header_fmt = base()
        .set_bold()
        .set_font_size(11)
        .set_font_color(Color::RGB(0xECF0F1))
        .set_background_color(Color::RGB(0x2C3E50))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0x1A252F));

    for (col, title) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, &header_fmt)?;
    }
    sheet.set_row_height(0, 32)?;

    for (i, row) in data.iter().enumerate() {
        let r = (i + 1) as u32;
        let band = if r % 2 == 0 { 0xF7F9FC } else { 0xFFFFFF };

        for (col, value) in row.iter().enumerate() {
            let mut fmt = base()
                .set_background_color(Color::RGB(band))
                .set_pattern(FormatPattern::Solid)
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::RGB(0xE0E0E0));
            if (2..=6).contains(&col) {
                fmt = fmt.set_align(FormatAlign::Center);
            }
            if col == 7 {
                fmt = kind_format(fmt, value);
            }

            if col == 5
                && let Ok(n) = value.parse::<f64>()
            {
                sheet.write_number_with_format(r, col as u16, n, &fmt)?;
            } else {
                sheet.write_string_with_format(r, col as u16, value, &fmt)?;
            }
        }
    }

    for (col, width) in [30.0, 12.0, 12.0, 10.0, 10.0, 8.0, 8.0, 12.0]
        .iter()
        .enumerate()
        .take(header.len())
    {
        sheet.set_column_width(col as u16, *width)?;
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofilter(0, 0, data.len() as u32, last_col)?;
    Ok(())
}

fn kind_format(fmt: Format, kind: &str) -> Format {
    match EventKind::from_label(kind) {
        Some(EventKind::Full) => fmt
            .set_background_color(Color::RGB(0x27AE60))
            .set_font_color(Color::White)
            .set_bold(),
        Some(EventKind::EntryOnly) => fmt
            .set_background_color(Color::RGB(0x3498DB))
            .set_font_color(Color::White),
        Some(EventKind::ExitOnly) => fmt
            .set_background_color(Color::RGB(0xE74C3C))
            .set_font_color(Color::White),
        None => fmt,
    }
}

/// Background and font color by worked hours of a day cell.
fn heat(hours: i64) -> Option<(u32, u32)> {
    match hours {
        h if h >= 8 => Some((0x27AE60, 0xFFFFFF)),
        h if h >= 6 => Some((0x58D68D, 0x1E5631)),
        h if h >= 4 => Some((0xF9E79F, 0x7D6608)),
        h if h > 0 => Some((0xF5B041, 0x784212)),
        _ => None,
    }
}

fn write_timesheet_sheet(
    sheet: &mut Worksheet,
    header: &TimesheetHeader,
    matrix: &[RawRow],
) -> AppResult<()> {
    sheet.write_string_with_format(
        0,
        0,
        "ТАБЕЛЬ УЧЁТА РАБОЧЕГО ВРЕМЕНИ",
        &base()
            .set_font_size(16)
            .set_bold()
            .set_font_color(Color::RGB(NAVY)),
    )?;
    sheet.write_string_with_format(
        1,
        0,
        &header.period,
        &base().set_font_size(11).set_font_color(Color::RGB(0x555555)),
    )?;
    sheet.write_string_with_format(
        2,
        0,
        &header.stats,
        &base().set_font_color(Color::RGB(0x777777)),
    )?;
    sheet.write_string_with_format(
        3,
        0,
        &header.updated,
        &base().set_font_color(Color::RGB(0x999999)).set_italic(),
    )?;

    let Some((columns, employees)) = matrix.split_first() else {
        return Ok(());
    };
    let last_col = columns.len().saturating_sub(1);

    let header_fmt = base()
        .set_bold()
        .set_font_size(11)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(NAVY))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border_bottom(FormatBorder::Medium)
        .set_border_bottom_color(Color::RGB(0x0D2137));

    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(MATRIX_HEADER_ROW, col as u16, title, &header_fmt)?;
    }
    sheet.set_row_height(MATRIX_HEADER_ROW, 36)?;

    for (i, row) in employees.iter().enumerate() {
        let r = MATRIX_HEADER_ROW + 1 + i as u32;

        for (col, value) in row.iter().enumerate() {
            let fmt = if col == 0 {
                let band = if (i + 1) % 2 == 0 { 0xECF0F1 } else { 0xF8F9FA };
                base()
                    .set_bold()
                    .set_align(FormatAlign::Left)
                    .set_background_color(Color::RGB(band))
                    .set_pattern(FormatPattern::Solid)
                    .set_border_right(FormatBorder::Medium)
                    .set_border_right_color(Color::RGB(NAVY))
            } else if col == last_col {
                base()
                    .set_bold()
                    .set_align(FormatAlign::Center)
                    .set_font_color(Color::White)
                    .set_background_color(Color::RGB(NAVY))
                    .set_pattern(FormatPattern::Solid)
            } else {
                let cell = base()
                    .set_align(FormatAlign::Center)
                    .set_border(FormatBorder::Thin)
                    .set_border_color(Color::RGB(0xE0E0E0));
                let hours = value
                    .split(':')
                    .next()
                    .and_then(|h| h.parse::<i64>().ok())
                    .unwrap_or(0);
                match heat(hours) {
                    Some((bg, fg)) => {
                        let cell = cell
                            .set_background_color(Color::RGB(bg))
                            .set_font_color(Color::RGB(fg))
                            .set_pattern(FormatPattern::Solid);
                        if hours >= 8 { cell.set_bold() } else { cell }
                    }
                    None => cell,
                }
            };

            sheet.write_string_with_format(r, col as u16, value, &fmt)?;
        }
    }

    sheet.set_column_width(0, 40)?;
    for col in 1..last_col {
        sheet.set_column_width(col as u16, 8)?;
    }
    if last_col > 0 {
        sheet.set_column_width(last_col as u16, 10)?;
    }

    sheet.set_freeze_panes(MATRIX_HEADER_ROW + 1, 1)?;
    Ok(())
}
