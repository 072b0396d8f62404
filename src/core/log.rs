use crate::db::log::LogEntry;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_TARGET_MAX: usize = 60;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// ANSI color of a log operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "import" => Colour::Cyan,
        "extract" => Colour::Blue,
        "aggregate" => Colour::Green,
        "render" | "export" => Colour::Yellow,
        "process" => Colour::RGB(255, 153, 51),
        "mark" => Colour::Fixed(245),
        "fail" => Colour::Red,
        "init" | "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(entries: &[LogEntry]) {
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return;
        }

        let op_w = entries
            .iter()
            .map(|e| op_target(e).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for entry in entries {
            let colored = paint_op_target(entry);
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }
    }
}

fn op_target(entry: &LogEntry) -> String {
    if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    }
}

/// `operation (target)` truncated to the column limit; only the operation is
/// colored.
fn paint_op_target(entry: &LogEntry) -> String {
    let color = color_for_operation(&entry.operation);
    let visible = op_target(entry);

    let truncated = if visible.chars().count() > OP_TARGET_MAX {
        let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}
