//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from a header row and data rows, sizing every column to
    /// its widest cell.
    pub fn from_rows(header: &[String], rows: &[Vec<String>]) -> Self {
        let columns = header
            .iter()
            .map(|h| Column {
                header: h.clone(),
                width: UnicodeWidthStr::width(h.as_str()),
            })
            .collect();
        let mut table = Self::new(columns);
        for row in rows {
            table.add_row(row.clone());
        }
        table
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            let w = UnicodeWidthStr::width(cell.as_str());
            match self.columns.get_mut(i) {
                Some(col) => col.width = col.width.max(w),
                None => self.columns.push(Column {
                    header: String::new(),
                    width: w,
                }),
            }
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        self.render_with(|_, _, value| value.to_string())
    }

    /// Render with a per-cell decorator `(column, value, padded) -> String`.
    /// Padding is applied before decoration so ANSI codes never shift columns.
    pub fn render_with<F>(&self, decorate: F) -> String
    where
        F: Fn(usize, &str, &str) -> String,
    {
        let mut out = String::new();

        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&decorate(i, value, &pad(value, col.width)));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

fn pad(value: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(value);
    format!("{value}{}", " ".repeat(width.saturating_sub(w)))
}

