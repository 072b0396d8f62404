//! Console output shared by every command.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const FG_BLUE: &str = "\x1b[34m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_STEP: &str = "›";

fn tagged(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    format!("{color}{BOLD}{icon}{RESET} {msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", tagged(FG_BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", tagged(FG_GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", tagged(FG_YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", tagged(FG_RED, ICON_ERR, msg));
}

/// Indented progress line for one pipeline stage of the current file.
pub fn step<T: fmt::Display>(stage: &str, msg: T) {
    println!("  {FG_CYAN}{ICON_STEP} {stage:<9}{RESET} {DIM}{msg}{RESET}");
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}==================== {msg}{RESET}\n");
}
