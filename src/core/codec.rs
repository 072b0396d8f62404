//! Duration and date codec for gate exports.
//!
//! Everything here is lenient: malformed text never raises, it coerces to
//! `0` minutes, `None` or the trimmed input.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static VERBOSE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]{2}\s").expect("valid verbose date regex"));

/// A date as it comes out of a spreadsheet cell.
///
/// Converters sometimes yield real date values and sometimes already
/// rendered, locale-specific strings.
#[derive(Debug, Clone, Copy)]
pub enum DateValue<'a> {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(&'a str),
}

/// Parse an `H:MM` duration into minutes.
///
/// Exactly two `:`-separated parts are required. Each part is read as a
/// leading integer; anything unreadable counts as zero.
pub fn parse_duration(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return 0;
    }

    let hours = leading_int(parts[0]);
    let mins = leading_int(parts[1]);

    hours.saturating_mul(60).saturating_add(mins).max(0)
}

/// Optional variant for cells that may be absent altogether.
pub fn parse_optional_duration(text: Option<&str>) -> i64 {
    text.map(parse_duration).unwrap_or(0)
}

/// Format minutes as `H:MM`; empty for zero or negative totals.
pub fn format_minutes(minutes: i64) -> String {
    if minutes <= 0 {
        return String::new();
    }
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a `DD.MM.YYYY` date. Returns `None` for anything that is not three
/// numeric parts forming a real calendar day.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.trim().split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Sort key used for date columns: seconds since the Unix epoch, `0` when
/// the text does not parse. Unparseable dates therefore sort first.
pub fn date_sort_key(text: &str) -> i64 {
    parse_date(text)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// Bring a date cell to the canonical `DD.MM.YYYY` form.
pub fn normalize_date(value: DateValue<'_>) -> String {
    match value {
        DateValue::Date(d) => d.format("%d.%m.%Y").to_string(),
        DateValue::DateTime(dt) => dt.format("%d.%m.%Y").to_string(),
        DateValue::Text(s) => {
            if s.trim().is_empty() {
                return String::new();
            }
            if VERBOSE_DATE.is_match(s)
                && let Some(d) = parse_verbose_date(s)
            {
                return d.format("%d.%m.%Y").to_string();
            }
            s.trim().to_string()
        }
    }
}

/// `"DD.MM.YYYY"` → `"DD.MM"` for column headers.
pub fn day_month(date: &str) -> String {
    let mut parts = date.split('.');
    match (parts.next(), parts.next()) {
        (Some(d), Some(m)) => format!("{d}.{m}"),
        _ => date.to_string(),
    }
}

/// `"Mon Feb 03 2026 00:00:00 GMT+0300 (Moscow Standard Time)"` and shorter
/// variants: weekday, month name, day and year are the first four tokens.
fn parse_verbose_date(s: &str) -> Option<NaiveDate> {
    let head: Vec<&str> = s.split_whitespace().take(4).collect();
    if head.len() < 4 {
        return None;
    }
    NaiveDate::parse_from_str(&head.join(" "), "%a %b %d %Y").ok()
}

/// Lenient integer read: optional sign followed by digits, the rest is
/// ignored. No digits at all gives zero.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
