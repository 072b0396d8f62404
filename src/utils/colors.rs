//! ANSI color helper utilities for terminal output.

use crate::models::event_kind::EventKind;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Event kind color: FULL green, ENTRY_ONLY blue, EXIT_ONLY red.
pub fn color_for_kind(label: &str) -> &'static str {
    match EventKind::from_label(label) {
        Some(EventKind::Full) => GREEN,
        Some(EventKind::EntryOnly) => BLUE,
        Some(EventKind::ExitOnly) => RED,
        None => RESET,
    }
}

/// Day cell color by worked hours, mirroring the report heat scale.
pub fn color_for_hours(value: &str) -> &'static str {
    let hours = value
        .split(':')
        .next()
        .and_then(|h| h.trim().parse::<i64>().ok())
        .unwrap_or(0);
    match hours {
        h if h >= 8 => GREEN,
        h if h >= 4 => YELLOW,
        h if h > 0 => RED,
        _ => GREY,
    }
}

pub fn paint(color: &str, value: &str) -> String {
    if color == RESET {
        value.to_string()
    } else {
        format!("{color}{value}{RESET}")
    }
}
